use serde::{Deserialize, Serialize};

/// GitHub user profile as produced by the desktop client's OAuth flow.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct GithubUserProfile {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl GithubUserProfile {
    /// `id` and `login` are the only required fields; a zero id or a blank
    /// login counts as missing.
    pub fn has_required_fields(&self) -> bool {
        matches!(self.id, Some(id) if id != 0)
            && self
                .login
                .as_deref()
                .is_some_and(|login| !login.trim().is_empty())
    }
}

/// Body of `POST /sync-user`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct SyncProfileRequest {
    #[serde(default)]
    pub profile: Option<GithubUserProfile>,
}
