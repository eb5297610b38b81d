//! # engram-core
//!
//! Foundation crate for the engram memory bank.
//! Defines all types, traits, errors, and config.
//! Every other crate in the workspace depends on this.

pub mod artifact;
pub mod config;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use artifact::{Artifact, ArtifactState, DecayCurve, OutputKind, TrustScore, TrustSignals};
pub use config::EngramConfig;
pub use errors::{EngramError, EngramResult};
pub use models::{ProducerRecord, TrustEvent};
