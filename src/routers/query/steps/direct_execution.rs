//! DirectRequestExecution step.
//!
//! Transition: DirectRequest → Responding

use sqg_protocol::chat::{ChatCompletionRequest, ChatMessage};
use tracing::{error, info};

use crate::routers::query::{
    context::RequestContext,
    error::{QueryError, UpstreamStage},
    state::{QueryState, StepResult},
};

/// Send the raw user text to the target model as the only message.
pub(crate) async fn direct_request_execution(
    ctx: &mut RequestContext,
) -> Result<StepResult, QueryError> {
    let client = ctx.processing.client.clone().ok_or_else(|| {
        error!("Direct request step called without a completion client");
        QueryError::Internal
    })?;

    let config = &ctx.components.config;
    let params = config.sampling.direct;
    let request = ChatCompletionRequest::new(
        config.models.target_model.as_str(),
        vec![ChatMessage::user_text(ctx.input.text.as_str())],
    )
    .with_max_tokens(params.max_tokens)
    .with_temperature(params.temperature);

    info!(stage = %UpstreamStage::Direct, model = %request.model, "Calling target model");

    let answer = client
        .complete(&request)
        .await
        .map_err(|e| QueryError::upstream(UpstreamStage::Direct, e))?;

    ctx.processing.answer = Some(answer);
    ctx.state = QueryState::Responding;
    Ok(StepResult::Continue)
}
