use async_trait::async_trait;

use crate::domain::user::models::AuthSession;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for account operations: registration, login and lookup.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account and issue its first session token.
    ///
    /// # Arguments
    /// * `command` - Validated username and password
    ///
    /// # Returns
    /// Session with the new user ID, username and token
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `Password` - Password hashing failed
    /// * `Token` - Token issuance failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, UserError>;

    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `command` - Raw username and password
    ///
    /// # Returns
    /// Session with the user ID, username and token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password (indistinguishable)
    /// * `Token` - Token issuance failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;
}

/// Persistence operations for accounts.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Arguments
    /// * `user` - Username and password hash
    ///
    /// # Returns
    /// Stored user with its assigned identifier
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
}
