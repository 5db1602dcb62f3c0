//! Storage backend configuration types.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Profile storage backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProfileBackend {
    #[default]
    Memory,
    None,
}

impl fmt::Display for ProfileBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileBackend::Memory => f.write_str("memory"),
            ProfileBackend::None => f.write_str("none"),
        }
    }
}

impl FromStr for ProfileBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(ProfileBackend::Memory),
            "none" | "noop" => Ok(ProfileBackend::None),
            other => Err(format!("unknown profile backend: {}", other)),
        }
    }
}
