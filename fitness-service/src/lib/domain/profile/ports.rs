use async_trait::async_trait;

use crate::domain::profile::errors::ProfileError;
use crate::domain::profile::metrics::ProfileStats;
use crate::domain::profile::models::HealthProfile;
use crate::domain::profile::models::UpsertProfileCommand;
use crate::domain::user::models::UserId;

/// Port for health profile operations.
///
/// Every operation is scoped to the authenticated user's own profile.
#[async_trait]
pub trait ProfileServicePort: Send + Sync + 'static {
    /// Retrieve the user's profile.
    ///
    /// # Errors
    /// * `NotFound` - User has no profile yet
    /// * `DatabaseError` - Database operation failed
    async fn get_profile(&self, user_id: &UserId) -> Result<HealthProfile, ProfileError>;

    /// Create the user's profile or replace the existing one.
    ///
    /// # Arguments
    /// * `user_id` - Owner of the profile
    /// * `command` - Validated profile fields
    ///
    /// # Returns
    /// Stored profile
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn upsert_profile(
        &self,
        user_id: &UserId,
        command: UpsertProfileCommand,
    ) -> Result<HealthProfile, ProfileError>;

    /// Compute derived metrics from the user's profile as of today.
    ///
    /// # Errors
    /// * `StatsUnavailable` - User has no profile yet
    /// * `DatabaseError` - Database operation failed
    async fn get_stats(&self, user_id: &UserId) -> Result<ProfileStats, ProfileError>;
}

/// Persistence operations for health profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync + 'static {
    /// Retrieve the profile owned by a user.
    ///
    /// # Returns
    /// Optional profile (None if the user has not created one)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_user_id(&self, user_id: &UserId)
        -> Result<Option<HealthProfile>, ProfileError>;

    /// Insert the profile, or overwrite the one already stored for its user.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn upsert(&self, profile: HealthProfile) -> Result<HealthProfile, ProfileError>;
}
