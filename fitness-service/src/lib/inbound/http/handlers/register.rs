use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::AuthSession;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::CREATED, session.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Deserialize)]
pub struct RegisterRequest {
    username: String,
    password: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, UserError> {
        let username = Username::new(self.username)?;
        let password = Password::new(self.password)?;
        Ok(RegisterCommand::new(username, password))
    }
}

/// Session payload shared by registration and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResponseData {
    pub user_id: i64,
    pub username: String,
    pub token: String,
}

impl From<&AuthSession> for SessionResponseData {
    fn from(session: &AuthSession) -> Self {
        Self {
            user_id: session.user_id.0,
            username: session.username.as_str().to_string(),
            token: session.token.clone(),
        }
    }
}
