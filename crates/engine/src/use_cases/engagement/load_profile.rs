//! Load profile use case.

use std::sync::Arc;

use kindness_domain::{Profile, UserId};

use crate::infrastructure::ports::ProfileRepo;

use super::error::EngagementError;

/// Fetches the signed-in reader's profile. Anonymous callers have none.
pub struct LoadProfile {
    profiles: Arc<dyn ProfileRepo>,
}

impl LoadProfile {
    pub fn new(profiles: Arc<dyn ProfileRepo>) -> Self {
        Self { profiles }
    }

    pub async fn execute(&self, caller: Option<UserId>) -> Result<Option<Profile>, EngagementError> {
        let Some(user_id) = caller else {
            return Ok(None);
        };

        let profile = self.profiles.get(user_id).await?;
        if profile.is_none() {
            tracing::debug!(user_id = %user_id, "No profile stored for caller");
        }
        Ok(profile)
    }
}
