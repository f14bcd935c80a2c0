//! Base error type.
//!
//! Sub-crates define their own error enums and either convert `SwarmError`
//! into them via `From` or wrap it as one variant.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `sw-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum SwarmError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("agent {0} has failed and is frozen until reset")]
    AgentFailed(AgentId),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `sw-core`.
pub type SwarmResult<T> = Result<T, SwarmError>;
