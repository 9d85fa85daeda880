use std::sync::OnceLock;

use crate::jwt::Claims;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds the only copy of the signing secret (inside its codec); build one at
/// startup and share it behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    dummy_hash: OnceLock<Option<String>>,
}

const DUMMY_PASSWORD: &str = "unknown-account-placeholder";

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `token_secret` - Secret key for token signing
    pub fn new(token_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(token_secret),
            dummy_hash: OnceLock::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Identifier to embed in the token
    /// * `username` - Username to embed in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match or the stored hash is unreadable
    /// * `TokenError` - Token issuance failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: i64,
        username: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_codec.issue(user_id, username)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Runs a full Argon2 verification against a placeholder hash so the
    /// rejection costs the same as a wrong password for a real account.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        let dummy_hash = self
            .dummy_hash
            .get_or_init(|| self.password_hasher.hash(DUMMY_PASSWORD).ok());

        if let Some(hash) = dummy_hash {
            let _ = self.password_hasher.verify(password, hash);
        }

        AuthenticationError::InvalidCredentials
    }

    /// Issue a session token without password verification.
    ///
    /// Used right after registration, where the caller has just chosen the password.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue_token(&self, user_id: i64, username: &str) -> Result<String, TokenError> {
        self.token_codec.issue(user_id, username)
    }

    /// Validate a session token and return its claims.
    ///
    /// # Errors
    /// * `TokenError` - Token is malformed, forged, expired or from another issuer
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_codec.validate(token)
    }
}
