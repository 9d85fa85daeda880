use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

/// Error type for session token operations.
///
/// The validation variants are distinct so callers can log and test them,
/// but a request boundary should report all of them the same way.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token issuer is not accepted")]
    WrongIssuer,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            // A header naming any algorithm other than ours is treated as a forged signature.
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::BadSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidIssuer => TokenError::WrongIssuer,
            _ => TokenError::Malformed(err.to_string()),
        }
    }
}
