use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::contract::ContractError;
use crate::{routers::error, upstream::UpstreamError};

/// Which upstream call failed. Selects the caller-facing wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamStage {
    Vision,
    Target,
    Direct,
}

impl UpstreamStage {
    pub fn label(self) -> &'static str {
        match self {
            UpstreamStage::Vision => "AI Vision Step",
            UpstreamStage::Target => "AI Target Step",
            UpstreamStage::Direct => "Direct AI Query",
        }
    }

    fn empty_content_message(self) -> &'static str {
        match self {
            UpstreamStage::Vision => "AI description content was empty",
            UpstreamStage::Target => "AI final answer content was empty",
            UpstreamStage::Direct => "Direct AI response content was empty",
        }
    }

    fn timeout_message(self) -> &'static str {
        match self {
            UpstreamStage::Vision => "Request to Vision AI timed out",
            UpstreamStage::Target => "Request to Target AI timed out",
            UpstreamStage::Direct => "Request to AI timed out",
        }
    }

    fn transport_prefix(self) -> &'static str {
        match self {
            UpstreamStage::Vision => "Failed during image analysis step",
            UpstreamStage::Target => "Failed during final answer generation step",
            UpstreamStage::Direct => "Failed processing direct AI query",
        }
    }
}

impl std::fmt::Display for UpstreamStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            UpstreamStage::Vision => "vision",
            UpstreamStage::Target => "target",
            UpstreamStage::Direct => "direct",
        })
    }
}

/// Terminal failure of a `/query` request.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Bad Request: Requires text or image data")]
    MissingInput,

    #[error("Internal Server Error: AI provider configuration missing")]
    ProviderNotConfigured,

    #[error("{}", upstream_message(.stage, .error))]
    Upstream {
        stage: UpstreamStage,
        #[source]
        error: UpstreamError,
    },

    #[error("AI description step failed: Output was not valid JSON")]
    InvalidContract(#[from] ContractError),

    /// A step ran without the state an earlier step should have produced.
    #[error("Internal Server Error")]
    Internal,
}

impl QueryError {
    pub fn upstream(stage: UpstreamStage, error: UpstreamError) -> Self {
        QueryError::Upstream { stage, error }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            QueryError::MissingInput => StatusCode::BAD_REQUEST,
            QueryError::ProviderNotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            QueryError::Upstream { error, .. } => error.status_code(),
            QueryError::InvalidContract(_) => StatusCode::INTERNAL_SERVER_ERROR,
            QueryError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            QueryError::MissingInput => "missing_input",
            QueryError::ProviderNotConfigured => "provider_not_configured",
            QueryError::Upstream { error, .. } => match error {
                UpstreamError::Timeout => "upstream_timeout",
                UpstreamError::Network(_) => "upstream_unreachable",
                UpstreamError::Http { .. } => "upstream_http_error",
                UpstreamError::Malformed(_) => "upstream_malformed_response",
                UpstreamError::Logic { .. } => "upstream_logic_error",
                UpstreamError::EmptyContent => "empty_completion",
            },
            QueryError::InvalidContract(_) => "invalid_vision_json",
            QueryError::Internal => "internal_error",
        }
    }
}

fn upstream_message(stage: &UpstreamStage, error: &UpstreamError) -> String {
    let stage = *stage;
    match error {
        UpstreamError::Timeout => stage.timeout_message().to_string(),
        UpstreamError::Network(detail) | UpstreamError::Malformed(detail) => {
            format!("{}: {}", stage.transport_prefix(), detail)
        }
        UpstreamError::Http { status, body } => {
            let body = if body.is_empty() {
                "Request failed"
            } else {
                body.as_str()
            };
            format!("{} Failed ({}): {}", stage.label(), status.as_u16(), body)
        }
        UpstreamError::Logic { message, .. } => format!("{} Error: {}", stage.label(), message),
        UpstreamError::EmptyContent => stage.empty_content_message().to_string(),
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        error::create_error(self.status_code(), self.code(), self.to_string())
    }
}
