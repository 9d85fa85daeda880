use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username must be at least {min} characters long.")]
    TooShort { min: usize, actual: usize },

    #[error("Username must not exceed {max} characters.")]
    TooLong { max: usize, actual: usize },
}

/// Error for password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters long.")]
    TooShort { min: usize },
}

/// Top-level error for all account operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("{0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("{0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Username already taken: {0}")]
    UsernameAlreadyExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token issuance failed: {0}")]
    Token(#[from] auth::TokenError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Background task failed: {0}")]
    TaskFailed(String),
}

impl From<auth::AuthenticationError> for UserError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
            auth::AuthenticationError::TokenError(e) => UserError::Token(e),
        }
    }
}

impl From<tokio::task::JoinError> for UserError {
    fn from(err: tokio::task::JoinError) -> Self {
        UserError::TaskFailed(err.to_string())
    }
}
