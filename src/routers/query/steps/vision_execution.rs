//! VisionRequestExecution step.
//!
//! Transition: VisionRequest → ContractCheck

use sqg_protocol::chat::ChatCompletionRequest;
use tracing::{error, info};

use crate::routers::query::{
    context::RequestContext,
    error::{QueryError, UpstreamStage},
    prompts,
    state::{QueryState, StepResult},
};

/// Ask the vision model for a JSON description of the screenshot.
///
/// ## Writes
/// - `ctx.processing.raw_description`: unchecked model output.
pub(crate) async fn vision_request_execution(
    ctx: &mut RequestContext,
) -> Result<StepResult, QueryError> {
    let client = ctx.processing.client.clone().ok_or_else(|| {
        error!("Vision request step called without a completion client");
        QueryError::Internal
    })?;

    let image = ctx.input.image.as_deref().ok_or_else(|| {
        error!("Vision request step called without an image");
        QueryError::Internal
    })?;

    let config = &ctx.components.config;
    let params = config.sampling.vision;
    let request = ChatCompletionRequest::new(
        config.models.vision_model.as_str(),
        vec![prompts::vision_message(
            &config.client_platform,
            &ctx.input.text,
            image,
        )],
    )
    .with_max_tokens(params.max_tokens)
    .with_temperature(params.temperature);

    info!(stage = %UpstreamStage::Vision, model = %request.model, "Calling vision model");

    let description = client
        .complete(&request)
        .await
        .map_err(|e| QueryError::upstream(UpstreamStage::Vision, e))?;

    ctx.processing.raw_description = Some(description);
    ctx.state = QueryState::ContractCheck;
    Ok(StepResult::Continue)
}
