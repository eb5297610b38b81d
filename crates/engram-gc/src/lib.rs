//! Garbage collection for the memory bank.
//!
//! A sweep snapshots the ids of Active and Archived artifacts, then
//! evaluates each one against the policy: decayed trust below the delete
//! threshold hard-deletes, below the archive threshold (or past the age or
//! expiry limits) archives. Every transition goes through the versioned
//! update primitive and leaves a `decay_inspection` trust event; losing a
//! version race skips the artifact until the next sweep. One sweep runs at
//! a time, and every sweep ends with a log row, failed ones included.

pub mod engine;

pub use engine::GcEngine;
