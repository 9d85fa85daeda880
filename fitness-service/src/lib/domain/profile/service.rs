use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::profile::errors::ProfileError;
use crate::domain::profile::metrics::calculate_stats;
use crate::domain::profile::metrics::ProfileStats;
use crate::domain::profile::models::HealthProfile;
use crate::domain::profile::models::UpsertProfileCommand;
use crate::domain::profile::ports::ProfileRepository;
use crate::domain::profile::ports::ProfileServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for health profile operations.
pub struct ProfileService<PR>
where
    PR: ProfileRepository,
{
    repository: Arc<PR>,
}

impl<PR> ProfileService<PR>
where
    PR: ProfileRepository,
{
    /// Create a new profile service.
    ///
    /// # Arguments
    /// * `repository` - Profile persistence implementation
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> ProfileServicePort for ProfileService<PR>
where
    PR: ProfileRepository,
{
    async fn get_profile(&self, user_id: &UserId) -> Result<HealthProfile, ProfileError> {
        self.repository
            .find_by_user_id(user_id)
            .await?
            .ok_or(ProfileError::NotFound)
    }

    async fn upsert_profile(
        &self,
        user_id: &UserId,
        command: UpsertProfileCommand,
    ) -> Result<HealthProfile, ProfileError> {
        let profile = HealthProfile::from_command(*user_id, command, Utc::now());
        let stored = self.repository.upsert(profile).await?;

        tracing::info!(user_id = %user_id, "Health profile saved");

        Ok(stored)
    }

    async fn get_stats(&self, user_id: &UserId) -> Result<ProfileStats, ProfileError> {
        let profile = self
            .repository
            .find_by_user_id(user_id)
            .await?
            .ok_or(ProfileError::StatsUnavailable)?;

        Ok(calculate_stats(&profile, Utc::now().date_naive()))
    }
}
