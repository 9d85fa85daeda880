use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::profile::errors::ProfileError;
use crate::user::errors::UserError;

pub mod get_current_user;
pub mod get_profile;
pub mod get_stats;
pub mod health;
pub mod login;
pub mod register;
pub mod update_profile;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Failure outcome of a handler.
///
/// `InternalServerError` carries the detail for the log only; clients
/// always see the opaque message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorBody { error: message })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidUsername(_) | UserError::InvalidPassword(_) => {
                ApiError::BadRequest(err.to_string())
            }
            UserError::UsernameAlreadyExists(_) => {
                ApiError::Conflict("Username already taken".to_string())
            }
            UserError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            UserError::NotFound(_) => ApiError::NotFound("User not found".to_string()),
            UserError::Password(_)
            | UserError::Token(_)
            | UserError::DatabaseError(_)
            | UserError::TaskFailed(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<ProfileError> for ApiError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::Invalid(_) => ApiError::BadRequest(err.to_string()),
            ProfileError::NotFound | ProfileError::StatsUnavailable => {
                ApiError::NotFound(err.to_string())
            }
            ProfileError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}
