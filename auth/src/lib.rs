//! Authentication utilities library
//!
//! Provides the credential and session primitives used by the fitness service:
//! - Password hashing (Argon2id)
//! - Session token issuance and validation (HS256 JWT, 24 hour lifetime)
//! - Authentication coordination
//!
//! The service owns its user store and request handling; this crate only knows
//! about passwords, secrets and claims.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::TokenCodec;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec.issue(42, "alice01").unwrap();
//! let claims = codec.validate(&token).unwrap();
//! assert_eq!(claims.user_id, 42);
//! assert_eq!(claims.username, "alice01");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, 1, "alice01").unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.user_id, 1);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
