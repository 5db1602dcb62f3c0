//! JSON gate between the vision call and the reasoning call.

use serde::de::IgnoredAny;

const JSON_FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

/// Vision output that passed the JSON syntax gate.
///
/// Only [`validate`] can build one, and the reasoning prompt only accepts
/// this type, so the reasoning call cannot run on unchecked output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisionDescription(String);

impl VisionDescription {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
    #[error("vision output is not valid JSON: {0}")]
    InvalidJson(String),
}

/// Trim, drop a surrounding ```` ```json ```` fence, and check JSON syntax.
///
/// The parsed value is discarded; the returned description holds the
/// stripped text exactly as the model wrote it.
pub fn validate(raw: &str) -> Result<VisionDescription, ContractError> {
    let candidate = strip_json_fence(raw.trim());

    serde_json::from_str::<IgnoredAny>(candidate)
        .map_err(|e| ContractError::InvalidJson(e.to_string()))?;

    Ok(VisionDescription(candidate.to_string()))
}

fn strip_json_fence(trimmed: &str) -> &str {
    if trimmed.len() >= JSON_FENCE_OPEN.len() + FENCE_CLOSE.len()
        && trimmed.starts_with(JSON_FENCE_OPEN)
        && trimmed.ends_with(FENCE_CLOSE)
    {
        trimmed[JSON_FENCE_OPEN.len()..trimmed.len() - FENCE_CLOSE.len()].trim()
    } else {
        trimmed
    }
}
