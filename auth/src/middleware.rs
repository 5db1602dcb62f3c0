use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use sqg_protocol::envelope::Envelope;
use tracing::{debug, error, warn};

use crate::api_key::{authenticate, AuthError};

/// State for [`api_key_auth_middleware`].
#[derive(Clone, Default)]
pub struct ApiKeyAuthState {
    api_key: Option<Arc<str>>,
}

impl ApiKeyAuthState {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.map(Arc::from),
        }
    }
}

impl std::fmt::Debug for ApiKeyAuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuthState")
            .field("configured", &self.api_key.is_some())
            .finish()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(Envelope::error(self.to_string()))).into_response()
    }
}

/// Reject requests without a valid `Authorization: Bearer <key>` header.
pub async fn api_key_auth_middleware(
    State(state): State<ApiKeyAuthState>,
    request: Request,
    next: Next,
) -> Response {
    match authenticate(request.headers(), state.api_key.as_deref()) {
        Ok(()) => {
            debug!(path = %request.uri().path(), "Authenticated request");
            next.run(request).await
        }
        Err(err) => {
            match err {
                AuthError::NotConfigured => {
                    error!("Inbound API key is not configured; rejecting request")
                }
                _ => warn!(path = %request.uri().path(), error = %err, "Authentication failed"),
            }
            err.into_response()
        }
    }
}
