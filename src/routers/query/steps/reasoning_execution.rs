//! ReasoningRequestExecution step.
//!
//! Transition: ReasoningRequest → Responding

use sqg_protocol::chat::{ChatCompletionRequest, ChatMessage};
use tracing::{error, info};

use crate::routers::query::{
    context::RequestContext,
    error::{QueryError, UpstreamStage},
    prompts,
    state::{QueryState, StepResult},
};

/// Ask the target model for the final answer, grounded in the validated
/// screenshot description.
pub(crate) async fn reasoning_request_execution(
    ctx: &mut RequestContext,
) -> Result<StepResult, QueryError> {
    let client = ctx.processing.client.clone().ok_or_else(|| {
        error!("Reasoning request step called without a completion client");
        QueryError::Internal
    })?;

    let description = ctx.processing.description.take().ok_or_else(|| {
        error!("Reasoning request step called without a validated description");
        QueryError::Internal
    })?;

    let config = &ctx.components.config;
    let params = config.sampling.reasoning;
    let prompt = prompts::reasoning_prompt(&config.client_platform, &ctx.input.text, &description);
    let request = ChatCompletionRequest::new(
        config.models.target_model.as_str(),
        vec![ChatMessage::user_text(prompt)],
    )
    .with_max_tokens(params.max_tokens)
    .with_temperature(params.temperature);

    info!(stage = %UpstreamStage::Target, model = %request.model, "Calling target model");

    let answer = client
        .complete(&request)
        .await
        .map_err(|e| QueryError::upstream(UpstreamStage::Target, e))?;

    ctx.processing.answer = Some(answer);
    ctx.state = QueryState::Responding;
    Ok(StepResult::Continue)
}
