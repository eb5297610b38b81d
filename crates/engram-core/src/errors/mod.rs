//! Central error taxonomy. Every fallible API in the workspace returns
//! [`EngramResult`].

mod storage_error;

pub use storage_error::StorageError;

use thiserror::Error;

/// Workspace-wide result alias.
pub type EngramResult<T> = Result<T, EngramError>;

/// Top-level error for all bank operations.
///
/// Nothing here is globally fatal. One artifact's failure never poisons
/// another's; callers treat `NotFound` as a best-effort miss and `Conflict`
/// as retryable.
#[derive(Debug, Error)]
pub enum EngramError {
    /// Producer input rejected before anything was persisted.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Unknown or deleted artifact reference.
    #[error("artifact not found: {id}")]
    NotFound { id: String },

    /// Optimistic version check failed (after the caller's retry budget,
    /// where one applies).
    #[error("version conflict on artifact {id}: expected version {expected_version}")]
    Conflict { id: String, expected_version: u64 },

    /// A collector sweep was already in flight.
    #[error("garbage collection sweep already in progress")]
    SweepInProgress,

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}
