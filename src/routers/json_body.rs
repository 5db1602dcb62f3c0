//! JSON body extraction shared by `/query` and `/sync-user`.
//!
//! Handlers take the raw body as `Result<Bytes, BytesRejection>` so every
//! failure (wrong content type, unreadable or oversized body, bad JSON) is
//! reported in the envelope shape instead of axum's plain-text rejections.

use axum::{
    extract::rejection::BytesRejection,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::error;

#[derive(Debug, thiserror::Error)]
pub enum JsonBodyError {
    #[error("Bad Request: Expected JSON")]
    UnsupportedContentType,

    #[error("Bad Request: Invalid JSON - {0}")]
    Invalid(String),

    #[error("Payload Too Large")]
    TooLarge,

    #[error("Bad Request: Could not read request body - {0}")]
    Unreadable(String),
}

impl JsonBodyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            JsonBodyError::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            JsonBodyError::UnsupportedContentType => "unsupported_content_type",
            JsonBodyError::Invalid(_) => "invalid_json",
            JsonBodyError::TooLarge => "payload_too_large",
            JsonBodyError::Unreadable(_) => "unreadable_body",
        }
    }
}

impl IntoResponse for JsonBodyError {
    fn into_response(self) -> Response {
        error::create_error(self.status_code(), self.code(), self.to_string())
    }
}

/// `application/json`, optionally followed by parameters such as `; charset=utf-8`.
pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

pub fn parse_json_body<T: DeserializeOwned>(
    route: &'static str,
    headers: &HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<T, JsonBodyError> {
    if !is_json_content_type(headers) {
        return Err(JsonBodyError::UnsupportedContentType);
    }

    let bytes = body.map_err(|rejection| {
        warn!(route, error = %rejection.body_text(), "Failed to read request body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            JsonBodyError::TooLarge
        } else {
            JsonBodyError::Unreadable(rejection.body_text())
        }
    })?;

    serde_json::from_slice(&bytes).map_err(|e| {
        warn!(route, error = %e, "Failed to parse JSON body");
        JsonBodyError::Invalid(e.to_string())
    })
}
