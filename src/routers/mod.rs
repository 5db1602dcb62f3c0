//! Request handlers and the helpers they share.

pub mod error;
pub mod json_body;
pub mod query;
pub mod sync;
