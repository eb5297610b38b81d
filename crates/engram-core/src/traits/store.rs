use std::sync::Arc;

use crate::artifact::{Artifact, ArtifactState, OutputKind};
use crate::errors::EngramResult;
use crate::models::{GcSweepLog, IndexEntry, IndexKind, TrustEvent};

/// Persistence seam for the bank: CRUD with optimistic versioning, index
/// lookup, the append-only trust event log, sweep logs, and aggregation.
pub trait IArtifactStore: Send + Sync {
    // --- CRUD ---
    /// Persist a new artifact, its index entries and its initial trust
    /// event in one transaction. All-or-nothing.
    fn create(
        &self,
        artifact: &Artifact,
        entries: &[IndexEntry],
        initial_event: &TrustEvent,
    ) -> EngramResult<()>;

    /// Fetch one artifact by reference id, any state, no decay applied.
    fn get(&self, id: &str) -> EngramResult<Option<Artifact>>;

    /// Fetch artifacts by id, skipping missing ones.
    fn get_bulk(&self, ids: &[String]) -> EngramResult<Vec<Artifact>>;

    /// The sole mutation primitive: optimistic compare-and-swap on the
    /// version stamp. On success the stored version becomes
    /// `expected_version + 1` (returned) and `event`, when given, is
    /// inserted in the same transaction. A version mismatch is `Conflict`;
    /// a missing or already-deleted artifact is `NotFound`; a backward
    /// state transition is `Validation`. Writing `state = Deleted` purges
    /// the payload and the artifact's index entries in the same
    /// transaction, keeping the row as an audit stub.
    fn update(
        &self,
        artifact: &Artifact,
        expected_version: u64,
        event: Option<&TrustEvent>,
    ) -> EngramResult<u64>;

    // --- Query ---
    /// Reference ids in any of `states`, oldest first.
    fn ids_by_state(&self, states: &[ArtifactState]) -> EngramResult<Vec<String>>;

    /// Full artifacts in any of `states`, oldest first.
    fn query_by_state(&self, states: &[ArtifactState]) -> EngramResult<Vec<Artifact>>;

    /// Reference ids carrying an index entry `(kind, value)`.
    fn lookup_index(&self, kind: IndexKind, value: &str) -> EngramResult<Vec<String>>;

    // --- Trust events ---
    /// Full event history for an artifact, oldest first. `NotFound` when
    /// the reference was never stored; deleted artifacts keep their
    /// history.
    fn trust_events(&self, artifact_id: &str) -> EngramResult<Vec<TrustEvent>>;

    // --- Sweep logs ---
    fn record_sweep(&self, log: &GcSweepLog) -> EngramResult<()>;

    /// Most recent sweeps first.
    fn sweep_history(&self, limit: usize) -> EngramResult<Vec<GcSweepLog>>;

    // --- Aggregation ---
    fn count_by_state(&self) -> EngramResult<Vec<(ArtifactState, u64)>>;
    fn count_by_kind(&self) -> EngramResult<Vec<(OutputKind, u64)>>;
    /// Mean stored trust over non-deleted artifacts; 0.0 on an empty bank.
    fn average_trust(&self) -> EngramResult<f64>;
}

/// Blanket impl: `Arc<T>` implements `IArtifactStore` by delegating to the
/// inner `T`, so `Arc<StorageEngine>` can be used wherever
/// `&dyn IArtifactStore` is needed.
impl<T: IArtifactStore> IArtifactStore for Arc<T> {
    fn create(
        &self,
        artifact: &Artifact,
        entries: &[IndexEntry],
        initial_event: &TrustEvent,
    ) -> EngramResult<()> {
        (**self).create(artifact, entries, initial_event)
    }

    fn get(&self, id: &str) -> EngramResult<Option<Artifact>> {
        (**self).get(id)
    }

    fn get_bulk(&self, ids: &[String]) -> EngramResult<Vec<Artifact>> {
        (**self).get_bulk(ids)
    }

    fn update(
        &self,
        artifact: &Artifact,
        expected_version: u64,
        event: Option<&TrustEvent>,
    ) -> EngramResult<u64> {
        (**self).update(artifact, expected_version, event)
    }

    fn ids_by_state(&self, states: &[ArtifactState]) -> EngramResult<Vec<String>> {
        (**self).ids_by_state(states)
    }

    fn query_by_state(&self, states: &[ArtifactState]) -> EngramResult<Vec<Artifact>> {
        (**self).query_by_state(states)
    }

    fn lookup_index(&self, kind: IndexKind, value: &str) -> EngramResult<Vec<String>> {
        (**self).lookup_index(kind, value)
    }

    fn trust_events(&self, artifact_id: &str) -> EngramResult<Vec<TrustEvent>> {
        (**self).trust_events(artifact_id)
    }

    fn record_sweep(&self, log: &GcSweepLog) -> EngramResult<()> {
        (**self).record_sweep(log)
    }

    fn sweep_history(&self, limit: usize) -> EngramResult<Vec<GcSweepLog>> {
        (**self).sweep_history(limit)
    }

    fn count_by_state(&self) -> EngramResult<Vec<(ArtifactState, u64)>> {
        (**self).count_by_state()
    }

    fn count_by_kind(&self) -> EngramResult<Vec<(OutputKind, u64)>> {
        (**self).count_by_kind()
    }

    fn average_trust(&self) -> EngramResult<f64> {
        (**self).average_trust()
    }
}
