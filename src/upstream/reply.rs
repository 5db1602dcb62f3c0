use serde_json::Value;
use sqg_protocol::chat::ChatCompletionResponse;

use super::{Completion, UpstreamError};

const UNKNOWN_PROVIDER_ERROR: &str = "Unknown provider error";

/// A `2xx` provider body, classified once.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamReply {
    Success(Completion),
    LogicError {
        message: String,
        error_type: Option<String>,
    },
    Empty,
    Malformed(String),
}

impl UpstreamReply {
    pub fn parse(body: &[u8]) -> Self {
        let value: Value = match serde_json::from_slice(body) {
            Ok(v) => v,
            Err(e) => return UpstreamReply::Malformed(format!("invalid JSON in response: {}", e)),
        };

        let response: ChatCompletionResponse = match serde_json::from_value(value) {
            Ok(r) => r,
            Err(e) => {
                return UpstreamReply::Malformed(format!("unexpected response shape: {}", e))
            }
        };

        if let Some(err) = response.provider_error() {
            return UpstreamReply::LogicError {
                message: err
                    .message()
                    .filter(|m| !m.is_empty())
                    .unwrap_or(UNKNOWN_PROVIDER_ERROR)
                    .to_string(),
                error_type: err.error_type().map(str::to_string),
            };
        }

        match Completion::from_content(response.first_content()) {
            Some(completion) => UpstreamReply::Success(completion),
            None => UpstreamReply::Empty,
        }
    }

    pub fn into_result(self) -> Result<Completion, UpstreamError> {
        match self {
            UpstreamReply::Success(completion) => Ok(completion),
            UpstreamReply::LogicError {
                message,
                error_type,
            } => Err(UpstreamError::Logic {
                message,
                error_type,
            }),
            UpstreamReply::Empty => Err(UpstreamError::EmptyContent),
            UpstreamReply::Malformed(reason) => Err(UpstreamError::Malformed(reason)),
        }
    }
}
