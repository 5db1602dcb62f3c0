//! Protocol definitions for the screen query gateway.
//!
//! - [`chat`]: OpenAI-compatible chat completion payloads sent to, and
//!   received from, upstream providers.
//! - [`query`]: the `/query` request and response bodies.
//! - [`profile`]: the `/sync-user` request body.
//! - [`envelope`]: the uniform success / error envelopes.

pub mod chat;
pub mod envelope;
pub mod profile;
pub mod query;
