//! Context types for the query pipeline.
//!
//! Two-level context design:
//! - `SharedComponents`: created once per orchestrator, `Arc`-cloned for each request.
//! - `RequestContext`: created fresh per request, owned and mutated by steps.

use std::sync::Arc;

use sqg_protocol::query::QueryRequestBody;

use super::{contract::VisionDescription, state::QueryState};
use crate::{
    config::GatewayConfig,
    upstream::{Completion, CompletionClient},
};

// ============================================================================
// SharedComponents (per-orchestrator)
// ============================================================================

/// Immutable state shared across all requests.
pub(crate) struct SharedComponents {
    pub config: Arc<GatewayConfig>,

    /// `None` when the provider URL or key is not configured.
    pub completion_client: Option<Arc<dyn CompletionClient>>,
}

// ============================================================================
// RequestContext (per-request)
// ============================================================================

/// Per-request mutable state passed through the state machine.
pub(crate) struct RequestContext {
    /// Immutable request data from the client.
    pub input: QueryInput,

    pub components: Arc<SharedComponents>,

    /// Current position in the state machine.
    pub state: QueryState,

    /// Populated incrementally by steps.
    pub processing: ProcessingState,
}

/// Normalized `/query` body.
#[derive(Debug, Clone)]
pub(crate) struct QueryInput {
    /// User question; empty when the client sent none.
    pub text: String,

    /// Image data URL; an empty string counts as absent.
    pub image: Option<String>,
}

impl From<QueryRequestBody> for QueryInput {
    fn from(body: QueryRequestBody) -> Self {
        Self {
            text: body.text.unwrap_or_default(),
            image: body.base64_image_data_url.filter(|s| !s.is_empty()),
        }
    }
}

impl QueryInput {
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

#[derive(Default)]
pub(crate) struct ProcessingState {
    /// Client resolved by the validation step.
    pub client: Option<Arc<dyn CompletionClient>>,

    /// Raw vision output awaiting the contract gate.
    pub raw_description: Option<Completion>,

    /// Set only by the contract gate.
    pub description: Option<VisionDescription>,

    /// Final answer from the direct or reasoning call.
    pub answer: Option<Completion>,
}

impl RequestContext {
    /// Create a new `RequestContext` in the `Validating` state.
    pub fn new(body: QueryRequestBody, components: Arc<SharedComponents>) -> Self {
        Self {
            input: body.into(),
            components,
            state: QueryState::Validating,
            processing: ProcessingState::default(),
        }
    }
}
