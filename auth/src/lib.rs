//! Authentication for the gateway's client-facing routes.
//!
//! This module provides:
//! - A pure bearer-token predicate over request headers and a configured secret
//! - Middleware that rejects unauthenticated requests with the standard error envelope

mod api_key;
mod middleware;

pub use api_key::{authenticate, AuthError};
pub use middleware::{api_key_auth_middleware, ApiKeyAuthState};
