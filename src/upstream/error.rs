use axum::http::StatusCode;

/// Classified failure of a single upstream call.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The call exceeded its deadline or was aborted.
    #[error("upstream request timed out")]
    Timeout,

    /// The provider could not be reached.
    #[error("{0}")]
    Network(String),

    /// The provider answered with a non-success status.
    #[error("upstream returned {status}")]
    Http { status: StatusCode, body: String },

    /// A success status whose body is not a completion object.
    #[error("{0}")]
    Malformed(String),

    /// A success status whose body carries a provider `error` object.
    #[error("{message}")]
    Logic {
        message: String,
        error_type: Option<String>,
    },

    /// `choices[0].message.content` was missing, null, or blank.
    #[error("completion content was empty")]
    EmptyContent,
}

impl UpstreamError {
    /// Caller-facing status for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            UpstreamError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            UpstreamError::Network(_) | UpstreamError::Malformed(_) => StatusCode::BAD_GATEWAY,
            UpstreamError::Http { status, .. } if status.is_server_error() => {
                StatusCode::BAD_GATEWAY
            }
            UpstreamError::Http { status, .. } => *status,
            UpstreamError::Logic { .. } => StatusCode::BAD_REQUEST,
            UpstreamError::EmptyContent => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Network(e.to_string())
        }
    }
}
