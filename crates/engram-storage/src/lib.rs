//! SQLite persistence for the memory bank.
//!
//! One serialized write connection, a round-robin pool of read-only
//! connections (WAL keeps readers off the writer's back), ordered schema
//! migrations, and a [`StorageEngine`] implementing the
//! `IArtifactStore` trait from `engram-core`.
//!
//! Every mutation goes through the versioned compare-and-swap in
//! [`queries::artifact_crud::update_artifact`]; there is no unversioned
//! write path.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use engram_core::errors::{EngramError, StorageError};

/// Wrap a low-level SQLite failure message into the workspace error type.
pub(crate) fn to_storage_err(message: String) -> EngramError {
    EngramError::Storage(StorageError::SqliteError { message })
}
