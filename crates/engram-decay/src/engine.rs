use chrono::{DateTime, Utc};
use engram_core::Artifact;

use crate::curve;

/// Full decay projection for one artifact at one instant, for
/// observability and sweep audit trails.
#[derive(Debug, Clone)]
pub struct DecayBreakdown {
    pub artifact_id: String,
    pub stored_trust: f64,
    pub elapsed_hours: f64,
    pub decay_factor: f64,
    pub decayed_trust: f64,
}

/// Read-time decay engine.
///
/// Applies the curve and half-life an artifact was created with. The
/// decayed value is a projection at `now`; the stored trust score is
/// never written back.
pub struct DecayEngine;

impl DecayEngine {
    pub fn new() -> Self {
        Self
    }

    /// Decay factor for `artifact` at `now`, in [0.0, 1.0].
    pub fn factor(&self, artifact: &Artifact, now: DateTime<Utc>) -> f64 {
        curve::decay_factor(
            artifact.decay_curve,
            artifact.half_life_hours,
            artifact.age_hours(now),
        )
    }

    /// Stored trust projected through the decay curve at `now`.
    pub fn decayed_trust(&self, artifact: &Artifact, now: DateTime<Utc>) -> f64 {
        (artifact.trust.value() * self.factor(artifact, now)).clamp(0.0, 1.0)
    }

    /// Factor, age, and projected trust in one pass.
    pub fn breakdown(&self, artifact: &Artifact, now: DateTime<Utc>) -> DecayBreakdown {
        let elapsed = artifact.age_hours(now);
        let factor = curve::decay_factor(artifact.decay_curve, artifact.half_life_hours, elapsed);
        let stored = artifact.trust.value();
        DecayBreakdown {
            artifact_id: artifact.id.clone(),
            stored_trust: stored,
            elapsed_hours: elapsed,
            decay_factor: factor,
            decayed_trust: (stored * factor).clamp(0.0, 1.0),
        }
    }
}

impl Default for DecayEngine {
    fn default() -> Self {
        Self::new()
    }
}
