use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use tokio::task;

use crate::domain::user::models::AuthSession;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::AccountServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for account operations.
///
/// Concrete implementation of AccountServicePort with dependency injection.
pub struct AccountService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AccountService<UR>
where
    UR: UserRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AccountServicePort for AccountService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, UserError> {
        // Reject duplicates before hashing.
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            tracing::info!(username = %command.username, "Registration rejected, username taken");
            return Err(UserError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        // Argon2 is CPU bound; keep it off the async workers.
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password.expose().to_string();
        let password_hash = task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Password hashing task failed"))?
            .inspect_err(|e| tracing::error!(error = %e, "Password hashing failed"))?;

        let user = self
            .repository
            .create(NewUser {
                username: command.username,
                password_hash,
            })
            .await?;

        let token = self
            .authenticator
            .issue_token(user.id.0, user.username.as_str())
            .inspect_err(|e| tracing::error!(user_id = %user.id, error = %e, "Token issuance failed"))?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(AuthSession {
            user_id: user.id,
            username: user.username,
            token,
        })
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, UserError> {
        let LoginCommand { username, password } = command;
        let authenticator = Arc::clone(&self.authenticator);

        // A username that could never have been registered cannot match a record.
        let user = match Username::new(username) {
            Ok(username) => self.repository.find_by_username(&username).await?,
            Err(_) => None,
        };

        // Unknown accounts still pay for a hash verification.
        let Some(user) = user else {
            let err = task::spawn_blocking(move || authenticator.reject_unknown(&password))
                .await?;
            tracing::info!("Login rejected, unknown account");
            return Err(err.into());
        };

        let stored_hash = user.password_hash.clone();
        let user_id = user.id.0;
        let token_username = user.username.as_str().to_string();
        let result = task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, user_id, &token_username)
        })
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Password verification task failed"))?
        .map_err(UserError::from)
        .inspect_err(|e| match e {
            UserError::InvalidCredentials => {
                tracing::info!(username = %user.username, "Login rejected")
            }
            _ => tracing::error!(user_id = %user.id, error = %e, "Token issuance failed"),
        })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthSession {
            user_id: user.id,
            username: user.username,
            token: result.access_token,
        })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}
