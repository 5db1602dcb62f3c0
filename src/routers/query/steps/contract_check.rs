//! ContractCheck step.
//!
//! Transition: ContractCheck → ReasoningRequest

use tracing::{error, info};

use crate::routers::query::{
    context::RequestContext,
    contract,
    error::QueryError,
    state::{QueryState, StepResult},
};

/// Run the JSON gate on the vision output.
///
/// A failure ends the request here; the reasoning step is never entered.
pub(crate) fn contract_check(ctx: &mut RequestContext) -> Result<StepResult, QueryError> {
    let raw = ctx.processing.raw_description.take().ok_or_else(|| {
        error!("Contract check called without vision output");
        QueryError::Internal
    })?;

    let description = contract::validate(raw.text()).map_err(|e| {
        error!(error = %e, content = %raw.text(), "Vision output failed JSON validation");
        QueryError::from(e)
    })?;

    info!(
        length = description.as_str().len(),
        "Vision description passed JSON validation"
    );

    ctx.processing.description = Some(description);
    ctx.state = QueryState::ReasoningRequest;
    Ok(StepResult::Continue)
}
