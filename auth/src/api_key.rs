use http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use subtle::ConstantTimeEq;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Internal Server Error: API Key configuration missing")]
    NotConfigured,

    #[error("Unauthorized: Missing or malformed Authorization header")]
    MissingCredentials,

    #[error("Unauthorized: Invalid API Key")]
    InvalidApiKey,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::MissingCredentials | AuthError::InvalidApiKey => StatusCode::UNAUTHORIZED,
        }
    }
}

/// Check the `Authorization: Bearer <key>` header against the configured key.
///
/// A missing or empty configured key is a server misconfiguration and is
/// reported before the header is even looked at.
pub fn authenticate(headers: &HeaderMap, expected: Option<&str>) -> Result<(), AuthError> {
    let expected = match expected {
        Some(key) if !key.is_empty() => key,
        _ => return Err(AuthError::NotConfigured),
    };

    let provided = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .ok_or(AuthError::MissingCredentials)?;

    if bool::from(provided.as_bytes().ct_eq(expected.as_bytes())) {
        Ok(())
    } else {
        Err(AuthError::InvalidApiKey)
    }
}
