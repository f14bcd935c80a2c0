//! World-subsystem error type.

use thiserror::Error;

/// Errors produced while loading or building a world.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid world: {0}")]
    Invalid(String),
}

pub type WorldResult<T> = Result<T, WorldError>;
