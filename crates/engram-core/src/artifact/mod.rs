//! The artifact model: every record in the bank is an [`Artifact`] carrying
//! a trust score, four audit signals, and a decay profile fixed at creation.

mod kind;
mod record;
mod state;
mod trust;

pub use kind::{decay_profile, DecayCurve, DecayProfile, OutputKind};
pub use record::Artifact;
pub use state::ArtifactState;
pub use trust::{TrustScore, TrustSignals};
