//! # engram-trust
//!
//! Trust scoring for the engram memory bank: the write-time scorer that
//! turns a producer record into four-signal initial trust, and the
//! outcome-driven update engine that moves trust as consumers report how
//! artifacts worked out.

pub mod scorer;
pub mod update;

pub use scorer::TrustScorer;
pub use update::TrustUpdateEngine;
