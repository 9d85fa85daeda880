use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::register::SessionResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::LoginCommand;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    let Json(body) = payload?;

    let command = LoginCommand {
        username: body.username,
        password: body.password,
    };

    state
        .account_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}
