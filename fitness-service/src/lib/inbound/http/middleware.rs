use auth::Authenticator;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use thiserror::Error;

use super::handlers::ApiErrorBody;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity of the caller, established from a verified bearer token.
///
/// Inserted into request extensions for protected routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
}

/// Reasons a request is rejected before reaching a protected handler.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("Missing authorization header")]
    MissingHeader,

    #[error("Invalid authorization format")]
    InvalidFormat,

    #[error("Invalid or expired token")]
    InvalidToken,
}

impl IntoResponse for AuthorizationError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ApiErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Resolve the caller from the `Authorization` header.
///
/// # Arguments
/// * `authenticator` - Validates the bearer token
/// * `headers` - Request headers
///
/// # Errors
/// * `MissingHeader` - Header absent or empty
/// * `InvalidFormat` - Header is not valid UTF-8 or lacks the `Bearer ` prefix
/// * `InvalidToken` - Signature, issuer or expiry check failed
pub fn authorize(
    authenticator: &Authenticator,
    headers: &HeaderMap,
) -> Result<AuthenticatedUser, AuthorizationError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .filter(|value| !value.is_empty())
        .ok_or(AuthorizationError::MissingHeader)?;

    let token = value
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .ok_or(AuthorizationError::InvalidFormat)?;

    let claims = authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(reason = %e, "Token validation failed");
        AuthorizationError::InvalidToken
    })?;

    Ok(AuthenticatedUser {
        user_id: UserId(claims.user_id),
        username: claims.username,
    })
}

/// Middleware that validates the bearer token and adds the caller to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthorizationError> {
    let user = authorize(&state.authenticator, req.headers())?;

    tracing::debug!(user_id = %user.user_id, "Request authorized");
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
