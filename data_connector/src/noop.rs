//! NoOp storage implementation
//!
//! Accepts every upsert without persisting it - useful when profile sync is
//! disabled.

use async_trait::async_trait;
use chrono::Utc;

use super::core::*;

#[derive(Default, Debug, Clone, Copy)]
pub struct NoOpProfileStorage;

impl NoOpProfileStorage {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProfileStorage for NoOpProfileStorage {
    async fn upsert_profile(&self, profile: NewProfile) -> ProfileResult<StoredProfile> {
        Ok(StoredProfile::new(profile, Utc::now()))
    }

    async fn get_profile(&self, _id: ProfileId) -> ProfileResult<Option<StoredProfile>> {
        Ok(None)
    }
}
