use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

use crate::config::SignalWeights;

/// Trust score clamped to [0.0, 1.0].
/// Represents how much the bank trusts an artifact's result.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct TrustScore(f64);

impl TrustScore {
    /// High trust threshold; artifacts above this are considered reliable.
    pub const HIGH: f64 = 0.8;
    /// Medium trust threshold.
    pub const MEDIUM: f64 = 0.5;
    /// Low trust threshold; artifacts below this may need re-evaluation.
    pub const LOW: f64 = 0.3;

    /// Create a new TrustScore, clamping to [0.0, 1.0].
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Check if trust is above the high threshold.
    pub fn is_high(self) -> bool {
        self.0 >= Self::HIGH
    }

    /// Check if trust is below the low threshold.
    pub fn is_low(self) -> bool {
        self.0 < Self::LOW
    }
}

/// An unscored artifact starts at zero; scoring always overwrites this.
impl Default for TrustScore {
    fn default() -> Self {
        Self(0.0)
    }
}

impl fmt::Display for TrustScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for TrustScore {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<TrustScore> for f64 {
    fn from(t: TrustScore) -> Self {
        t.0
    }
}

impl Add for TrustScore {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.0 + rhs.0)
    }
}

impl Sub for TrustScore {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.0 - rhs.0)
    }
}

impl Mul<f64> for TrustScore {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.0 * rhs)
    }
}

/// The four additive trust signals, each in [0.0, 1.0] and independently
/// retrievable for audit. Provenance, consensus and governance are fixed at
/// creation; usage evolves with outcome reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct TrustSignals {
    pub provenance: f64,
    pub consensus: f64,
    pub governance: f64,
    pub usage: f64,
}

impl TrustSignals {
    /// Create signals, clamping each component to [0.0, 1.0].
    pub fn new(provenance: f64, consensus: f64, governance: f64, usage: f64) -> Self {
        Self {
            provenance: provenance.clamp(0.0, 1.0),
            consensus: consensus.clamp(0.0, 1.0),
            governance: governance.clamp(0.0, 1.0),
            usage: usage.clamp(0.0, 1.0),
        }
    }

    /// Weighted total under the given weights, clamped to [0.0, 1.0].
    /// With nominal weights this is the cached trust score at creation.
    pub fn weighted_total(&self, weights: &SignalWeights) -> TrustScore {
        TrustScore::new(
            self.provenance * weights.provenance
                + self.consensus * weights.consensus
                + self.governance * weights.governance
                + self.usage * weights.usage,
        )
    }
}
