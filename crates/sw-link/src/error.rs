//! Link-subsystem error type.

use thiserror::Error;

/// Errors produced by `sw-link`.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("unknown proximity index {0:?} (expected brute-force, grid, or rtree)")]
    UnknownIndex(String),
}

pub type LinkResult<T> = Result<T, LinkError>;
