use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::profile::metrics::ProfileStats;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_stats(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<ProfileStats>, ApiError> {
    state
        .profile_service
        .get_stats(&caller.user_id)
        .await
        .map_err(ApiError::from)
        .map(|stats| ApiSuccess::new(StatusCode::OK, stats))
}
