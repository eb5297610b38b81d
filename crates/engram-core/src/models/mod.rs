//! Wire and persistence models surrounding the artifact: producer input,
//! the append-only trust event log, secondary index entries, sweep logs,
//! and retrieval query/hit types.

mod index_entry;
mod producer;
mod query;
mod sweep;
mod trust_event;

pub use index_entry::{IndexEntry, IndexKind};
pub use producer::ProducerRecord;
pub use query::{ArtifactQuery, RankedHit};
pub use sweep::GcSweepLog;
pub use trust_event::{Outcome, SignalDeltas, TrustEvent, TrustEventKind};
