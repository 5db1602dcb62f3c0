//! Validation step.
//!
//! Transition: Validating → VisionRequest (image present)
//!                        | DirectRequest (text only)

use tracing::{error, info, warn};

use crate::routers::query::{
    context::RequestContext,
    error::QueryError,
    state::{QueryState, StepResult},
};

const LOG_TEXT_PREVIEW_CHARS: usize = 50;

/// Reject empty input, then resolve the provider client.
///
/// Input is checked first: an empty request is a client error even when the
/// gateway itself is misconfigured. Nothing here touches the network.
///
/// ## Writes
/// - `ctx.processing.client`
/// - `ctx.state` → `VisionRequest` or `DirectRequest`.
pub(crate) fn validation(ctx: &mut RequestContext) -> Result<StepResult, QueryError> {
    let input = &ctx.input;

    if !input.has_text() && input.image.is_none() {
        warn!("Rejecting query without text or image");
        return Err(QueryError::MissingInput);
    }

    let image = if input.image.is_some() { "present" } else { "none" };
    info!(text = %preview(&input.text), image, "Received query");

    let client = ctx.components.completion_client.clone().ok_or_else(|| {
        error!("AI provider URL or key is not configured");
        QueryError::ProviderNotConfigured
    })?;
    ctx.processing.client = Some(client);

    ctx.state = match input.image.as_deref() {
        Some(image) => {
            if !image.starts_with("data:image/") {
                warn!("Image is not a data:image/ URL, proceeding anyway");
            }
            QueryState::VisionRequest
        }
        None => QueryState::DirectRequest,
    };

    Ok(StepResult::Continue)
}

fn preview(text: &str) -> String {
    if text.is_empty() {
        return "None".to_string();
    }
    let mut preview: String = text.chars().take(LOG_TEXT_PREVIEW_CHARS).collect();
    if text.chars().count() > LOG_TEXT_PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}
