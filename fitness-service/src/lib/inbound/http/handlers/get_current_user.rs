use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::User;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<CurrentUserResponseData>, ApiError> {
    state
        .account_service
        .get_user(&caller.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUserResponseData {
    pub user_id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for CurrentUserResponseData {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.0,
            username: user.username.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}
