use async_trait::async_trait;

use crate::errors::Result;
use crate::profile::profile_model::{UserDemographics, UserHealthProfile};

/// Read access to user demographics and health profiles.
#[async_trait]
pub trait HealthProfileRepositoryTrait: Send + Sync {
    /// Returns None when the user does not exist.
    async fn get_user_demographics(&self, user_id: &str) -> Result<Option<UserDemographics>>;

    /// Returns None when the user has not filled in a health profile.
    async fn get_health_profile(&self, user_id: &str) -> Result<Option<UserHealthProfile>>;
}
