//! Client for OpenAI-compatible chat completion providers.
//!
//! Every call is a single attempt. Failures are classified into
//! [`UpstreamError`] so the caller can map them to a caller-facing status
//! without inspecting transport details.

mod client;
mod error;
mod reply;

use async_trait::async_trait;
pub use client::{read_response_body_limited, HttpCompletionClient, ReadBodyResult};
pub use error::UpstreamError;
pub use reply::UpstreamReply;
use sqg_protocol::chat::ChatCompletionRequest;

/// Upper bound on how much of an upstream error body is buffered.
pub const MAX_ERROR_BODY_SIZE: usize = 1024 * 1024;

/// Non-empty, trimmed completion text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    text: String,
}

impl Completion {
    /// Returns `None` when the content is missing or blank.
    pub fn from_content(content: Option<&str>) -> Option<Self> {
        let text = content?.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Seam between the query pipeline and the provider.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<Completion, UpstreamError>;
}
