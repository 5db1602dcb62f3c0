// Core types for the profile data connector.
//
// Contains the storage trait, data types, error types and IDs shared by all
// profile storage backends.

use std::fmt::{Display, Formatter};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqg_protocol::profile::GithubUserProfile;

/// GitHub numeric user id; the upsert key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ProfileId(pub u64);

impl From<u64> for ProfileId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for ProfileId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A profile that passed required-field validation and is ready to upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProfile {
    pub id: ProfileId,
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
}

impl NewProfile {
    /// Returns `None` when `id` or `login` is missing.
    pub fn from_github(profile: GithubUserProfile) -> Option<Self> {
        if !profile.has_required_fields() {
            return None;
        }
        Some(Self {
            id: ProfileId(profile.id?),
            login: profile.login?,
            name: profile.name,
            avatar_url: profile.avatar_url,
            email: profile.email,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredProfile {
    pub id: ProfileId,
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
    pub first_synced_at: DateTime<Utc>,
    pub last_synced_at: DateTime<Utc>,
}

impl StoredProfile {
    pub fn new(profile: NewProfile, now: DateTime<Utc>) -> Self {
        Self {
            id: profile.id,
            login: profile.login,
            name: profile.name,
            avatar_url: profile.avatar_url,
            email: profile.email,
            first_synced_at: now,
            last_synced_at: now,
        }
    }

    /// Overwrite every mutable field, keeping `first_synced_at`.
    pub fn apply(&mut self, profile: NewProfile, now: DateTime<Utc>) {
        self.login = profile.login;
        self.name = profile.name;
        self.avatar_url = profile.avatar_url;
        self.email = profile.email;
        self.last_synced_at = now;
    }
}

/// Result alias for profile storage operations
pub type ProfileResult<T> = Result<T, ProfileStorageError>;

/// Error type for profile storage operations
#[derive(Debug, thiserror::Error)]
pub enum ProfileStorageError {
    #[error("Database operation failed: login '{login}' already belongs to user {owner}")]
    LoginConflict { login: String, owner: ProfileId },

    #[error("Database operation failed: {0}")]
    StorageError(String),
}

/// Trait describing the interface for profile storage backends
#[async_trait]
pub trait ProfileStorage: Send + Sync + 'static {
    /// Insert the profile, or update the existing row with the same id.
    async fn upsert_profile(&self, profile: NewProfile) -> ProfileResult<StoredProfile>;

    async fn get_profile(&self, id: ProfileId) -> ProfileResult<Option<StoredProfile>>;
}
