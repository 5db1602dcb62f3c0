//! Single state machine driver for the query pipeline.
//!
//! One function, one loop, one match. The first error ends the request.

use sqg_protocol::query::QueryResponse;

use super::{
    context::RequestContext,
    error::QueryError,
    state::{QueryState, StepResult},
    steps,
};

pub(crate) async fn execute(ctx: &mut RequestContext) -> Result<QueryResponse, QueryError> {
    loop {
        let result = match ctx.state {
            QueryState::Validating => steps::validation(ctx),

            QueryState::DirectRequest => steps::direct_request_execution(ctx).await,

            QueryState::VisionRequest => steps::vision_request_execution(ctx).await,

            QueryState::ContractCheck => steps::contract_check(ctx),

            QueryState::ReasoningRequest => steps::reasoning_request_execution(ctx).await,

            QueryState::Responding => steps::response_processing(ctx),
        };

        match result? {
            StepResult::Continue => continue,
            StepResult::Done(response) => return Ok(response),
        }
    }
}
