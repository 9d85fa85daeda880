use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Issuer stamped into every session token.
pub const TOKEN_ISSUER: &str = "fitness-tracker-app";

/// Lifetime of a session token in hours.
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Session token claims.
///
/// Carries the numeric user identifier and username alongside the
/// standard `iat`, `exp` and `iss` registered claims.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Numeric user identifier
    pub user_id: i64,

    /// Username at the time of issuance
    pub username: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Create claims for a user issued at the given instant.
    ///
    /// # Arguments
    /// * `user_id` - Numeric user identifier
    /// * `username` - Username to embed
    /// * `issued_at` - Issuance instant; expiry is 24 hours later
    ///
    /// # Returns
    /// Claims with iat, exp and iss set
    pub fn for_user(user_id: i64, username: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        let expiration = issued_at + Duration::hours(TOKEN_LIFETIME_HOURS);

        Self {
            user_id,
            username: username.into(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
            iss: TOKEN_ISSUER.to_string(),
        }
    }

    /// Override the issuer. Test-only: issued tokens always carry [`TOKEN_ISSUER`].
    #[cfg(test)]
    pub(crate) fn with_issuer(mut self, iss: impl Into<String>) -> Self {
        self.iss = iss.into();
        self
    }

    /// Check if the token is expired.
    ///
    /// A token is only valid strictly before its expiry instant.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
