//! Gateway configuration.
//!
//! A [`GatewayConfig`] is assembled once at startup (from CLI flags and
//! environment variables, or through [`GatewayConfigBuilder`] in tests) and
//! shared read-only by every request.

mod builder;
mod types;
mod validation;

pub use builder::GatewayConfigBuilder;
pub use types::*;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
