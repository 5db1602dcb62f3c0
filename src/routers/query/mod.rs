//! `/query`: vision → reasoning pipeline over an OpenAI-compatible provider.
//!
//! Requests with an image take two upstream calls (describe the screenshot,
//! then answer from the description); text-only requests take one. The
//! pipeline is a small state machine: `driver` loops over `state`, each step
//! lives in `steps/`.

pub mod contract;
mod context;
mod driver;
pub mod error;
mod handler;
mod orchestrator;
pub mod prompts;
mod state;
mod steps;

pub use contract::{ContractError, VisionDescription};
pub use error::{QueryError, UpstreamStage};
pub use handler::query;
pub use orchestrator::QueryOrchestrator;
