//! In-memory profile storage.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use super::core::*;

/// Profiles keyed by GitHub id, with a secondary unique index on login.
#[derive(Default)]
pub struct MemoryProfileStorage {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    profiles: HashMap<ProfileId, StoredProfile>,
    logins: HashMap<String, ProfileId>,
}

impl MemoryProfileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProfileStorage for MemoryProfileStorage {
    async fn upsert_profile(&self, profile: NewProfile) -> ProfileResult<StoredProfile> {
        let now = Utc::now();
        let mut guard = self.inner.write();
        let inner: &mut Inner = &mut guard;

        if let Some(owner) = inner.logins.get(&profile.login) {
            if *owner != profile.id {
                return Err(ProfileStorageError::LoginConflict {
                    login: profile.login,
                    owner: *owner,
                });
            }
        }

        let id = profile.id;
        let login = profile.login.clone();
        let stored = match inner.profiles.get_mut(&id) {
            Some(existing) => {
                let previous_login = existing.login.clone();
                existing.apply(profile, now);
                let stored = existing.clone();
                if previous_login != login {
                    inner.logins.remove(&previous_login);
                }
                stored
            }
            None => {
                let stored = StoredProfile::new(profile, now);
                inner.profiles.insert(id, stored.clone());
                stored
            }
        };
        inner.logins.insert(login, id);

        tracing::debug!(user_id = %id, "Upserted profile");
        Ok(stored)
    }

    async fn get_profile(&self, id: ProfileId) -> ProfileResult<Option<StoredProfile>> {
        Ok(self.inner.read().profiles.get(&id).cloned())
    }
}
