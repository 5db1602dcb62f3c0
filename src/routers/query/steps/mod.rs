//! Step implementations for the query state machine.
//!
//! Each step is a standalone function that reads/writes `RequestContext`
//! and updates `ctx.state` to drive the state machine forward.

mod contract_check;
mod direct_execution;
mod reasoning_execution;
mod response_processing;
mod validation;
mod vision_execution;

pub(crate) use contract_check::contract_check;
pub(crate) use direct_execution::direct_request_execution;
pub(crate) use reasoning_execution::reasoning_request_execution;
pub(crate) use response_processing::response_processing;
pub(crate) use validation::validation;
pub(crate) use vision_execution::vision_request_execution;
