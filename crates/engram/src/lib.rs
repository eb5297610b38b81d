//! # engram
//!
//! The memory bank facade. A [`MemoryBank`] owns the storage engine and
//! every domain engine behind one surface:
//!
//! - `store` scores a producer record and persists the artifact, its
//!   index entries and the initial trust event in one transaction
//! - `read` runs the ranked retrieval pipeline, decaying trust per call
//! - `update_trust` / `adjust_trust` move trust and append audit events
//! - `get_trust_history` returns the append-only event log
//! - `garbage_collect` runs one policy-driven collector sweep
//!
//! [`GcScheduler`] runs sweeps on a tokio interval until shut down, and
//! [`telemetry::init`] wires up the tracing subscriber for embedders.

pub mod bank;
pub mod scheduler;
pub mod telemetry;

pub use bank::{BankStats, MemoryBank, StoreReceipt};
pub use scheduler::GcScheduler;

// Re-export the vocabulary callers need so embedders depend on one crate.
pub use engram_core::artifact::{
    Artifact, ArtifactState, DecayCurve, OutputKind, TrustScore, TrustSignals,
};
pub use engram_core::config::{EngramConfig, GcPolicy};
pub use engram_core::errors::{EngramError, EngramResult};
pub use engram_core::models::{
    ArtifactQuery, GcSweepLog, Outcome, ProducerRecord, RankedHit, TrustEvent, TrustEventKind,
};
