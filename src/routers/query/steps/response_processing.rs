//! ResponseProcessing step.
//!
//! Transition: Responding → (terminal)

use sqg_protocol::query::QueryResponse;
use tracing::{error, info};

use crate::routers::query::{context::RequestContext, error::QueryError, state::StepResult};

pub(crate) fn response_processing(ctx: &mut RequestContext) -> Result<StepResult, QueryError> {
    let answer = ctx.processing.answer.take().ok_or_else(|| {
        error!("Response processing called without an answer");
        QueryError::Internal
    })?;

    info!(length = answer.text().len(), "Query completed");

    Ok(StepResult::Done(QueryResponse {
        ai_text: answer.into_text(),
    }))
}
