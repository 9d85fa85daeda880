use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UsernameError;

/// Registered account.
///
/// Holds the password hash only; plaintext never reaches this type.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Account data to persist; the store assigns the identifier.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: String,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 6-50 characters long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 6;
    const MAX_LENGTH: usize = 50;

    /// Create a new valid username.
    ///
    /// Length is counted in characters, not bytes.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 6 characters
    /// * `TooLong` - Username longer than 50 characters
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(username))
        }
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted at registration.
///
/// Checked against the minimum length and redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;

    /// Create a password that satisfies the length policy.
    ///
    /// # Errors
    /// * `TooShort` - Password shorter than 6 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.chars().count() < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        Ok(Self(password))
    }

    /// Expose the plaintext for hashing.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Command to register a new account with validated fields
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub password: Password,
}

impl RegisterCommand {
    /// Construct a new register command.
    pub fn new(username: Username, password: Password) -> Self {
        Self { username, password }
    }
}

/// Command to log in with raw credentials.
///
/// Login does not apply the registration rules, so the fields stay unvalidated.
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Outcome of a successful registration or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user_id: UserId,
    pub username: Username,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_length_boundaries() {
        assert_eq!(
            Username::new("alice".to_string()),
            Err(UsernameError::TooShort { min: 6, actual: 5 })
        );
        assert!(Username::new("alice1".to_string()).is_ok());
        assert!(Username::new("a".repeat(50)).is_ok());
        assert_eq!(
            Username::new("a".repeat(51)),
            Err(UsernameError::TooLong {
                max: 50,
                actual: 51
            })
        );
    }

    #[test]
    fn test_username_counts_characters() {
        // Six characters, twelve bytes.
        assert!(Username::new("éééééé".to_string()).is_ok());
    }

    #[test]
    fn test_username_error_messages() {
        let err = Username::new("bob".to_string()).unwrap_err();
        assert_eq!(err.to_string(), "Username must be at least 6 characters long.");

        let err = Username::new("b".repeat(60)).unwrap_err();
        assert_eq!(err.to_string(), "Username must not exceed 50 characters.");
    }

    #[test]
    fn test_password_policy() {
        let err = Password::new("12345".to_string()).unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters long.");

        let password = Password::new("secret1".to_string()).unwrap();
        assert_eq!(password.expose(), "secret1");
    }

    #[test]
    fn test_debug_output_redacts_passwords() {
        let password = Password::new("secret1".to_string()).unwrap();
        assert!(!format!("{:?}", password).contains("secret1"));

        let command = LoginCommand {
            username: "alice01".to_string(),
            password: "secret1".to_string(),
        };
        let debug = format!("{:?}", command);
        assert!(debug.contains("alice01"));
        assert!(!debug.contains("secret1"));
    }
}
