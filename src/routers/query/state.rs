//! State machine types for the query pipeline.

use sqg_protocol::query::QueryResponse;

/// Position of a request in the pipeline.
///
/// The validation step picks the branch: a request with an image goes
/// through the vision path, a text-only request takes the direct path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QueryState {
    /// Entry state for every request.
    Validating,

    // ── Direct path ─────────────────────────────────────────────
    /// One call to the target model with the raw user text.
    DirectRequest,

    // ── Vision path ─────────────────────────────────────────────
    /// Describe the screenshot with the vision model.
    VisionRequest,
    /// Gate the description before it may reach the target model.
    ContractCheck,
    /// Answer using the validated description.
    ReasoningRequest,

    // ── Terminal ────────────────────────────────────────────────
    /// Wrap the final answer.
    Responding,
}

/// The result of executing a single step.
pub(crate) enum StepResult {
    /// The step updated `ctx.state`. The driver should continue the loop.
    Continue,
    /// Terminal: return this answer to the client.
    Done(QueryResponse),
}
