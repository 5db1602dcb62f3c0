use axum::{
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use sqg_protocol::envelope::Envelope;

pub const HEADER_X_SQG_ERROR_CODE: &str = "X-SQG-Error-Code";

pub fn internal_error(code: impl Into<String>, message: impl Into<String>) -> Response {
    create_error(StatusCode::INTERNAL_SERVER_ERROR, code, message)
}

pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Response {
    create_error(StatusCode::BAD_REQUEST, code, message)
}

pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Response {
    create_error(StatusCode::NOT_FOUND, code, message)
}

/// Envelope error response: `{"success": false, "message": ...}` plus a
/// machine-readable code in [`HEADER_X_SQG_ERROR_CODE`].
pub fn create_error(
    status: StatusCode,
    code: impl Into<String>,
    message: impl Into<String>,
) -> Response {
    let code_str = code.into();

    let mut headers = HeaderMap::with_capacity(1);
    if let Ok(val) = HeaderValue::from_str(&code_str) {
        headers.insert(HEADER_X_SQG_ERROR_CODE, val);
    }

    (status, headers, Json(Envelope::error(message))).into_response()
}

pub fn extract_error_code_from_response<B>(response: &Response<B>) -> &str {
    response
        .headers()
        .get(HEADER_X_SQG_ERROR_CODE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

static ORG_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s*\borganization org-\S+").unwrap());
static PROJ_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s*\bproject proj_\S+").unwrap());

/// Strip provider account identifiers from an upstream error body before it
/// is echoed to the caller.
///
/// JSON bodies with `error.message` get org/project ids removed; other
/// bodies pass through unchanged.
pub fn sanitize_error_body(body: &str) -> String {
    let mut json: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => return body.to_string(),
    };

    let Some(error) = json.get_mut("error").and_then(Value::as_object_mut) else {
        return body.to_string();
    };
    let Some(Value::String(msg)) = error.get("message") else {
        return body.to_string();
    };

    let sanitized = ORG_ID_RE.replace_all(msg, "");
    let sanitized = PROJ_ID_RE.replace_all(&sanitized, "");
    if sanitized.as_ref() == msg.as_str() {
        return body.to_string();
    }
    let sanitized = sanitized.into_owned();
    error.insert("message".into(), Value::String(sanitized));

    serde_json::to_string(&json).unwrap_or_else(|_| body.to_string())
}
