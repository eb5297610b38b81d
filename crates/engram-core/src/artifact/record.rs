use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::kind::{DecayCurve, OutputKind};
use super::state::ArtifactState;
use super::trust::{TrustScore, TrustSignals};

/// The universal storage unit. Every record in the bank is an Artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    /// UUID v4 reference id.
    pub id: String,
    /// Producer loop this artifact came from.
    pub loop_id: String,
    /// Producing component name; scored against the reputation table.
    pub component: String,
    /// Output kind; fixes the decay profile at creation.
    pub kind: OutputKind,
    /// Opaque result payload. The bank stores and returns it, never reads it.
    pub result: serde_json::Value,
    /// Optional domain label, indexed as a concept entry.
    pub domain: Option<String>,
    /// Optional category label, indexed as a concept entry.
    pub category: Option<String>,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Cached trust score: a materialized projection of the event log.
    pub trust: TrustScore,
    /// The four signals as of the last recompute.
    pub signals: TrustSignals,
    /// Decay curve, fixed at creation from the output kind.
    pub decay_curve: DecayCurve,
    /// Half-life in hours, fixed at creation from the output kind.
    pub half_life_hours: f64,
    /// Producer importance hint in [0, 1]. Defaults to 0.5.
    pub importance: f64,
    /// Outcome reports received (success + failure).
    pub access_count: u64,
    pub success_count: u64,
    pub failure_count: u64,
    /// Last outcome report time.
    pub last_accessed_at: Option<DateTime<Utc>>,
    /// Whether the producer attested constitutional compliance.
    pub constitutional_compliance: bool,
    pub requires_approval: bool,
    pub state: ArtifactState,
    /// Optimistic concurrency stamp; incremented by every successful mutation.
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Optional expiry; a passed expiry is an archival trigger for the collector.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Artifact {
    /// Hours elapsed since creation at `now`. Clock skew never goes negative.
    pub fn age_hours(&self, now: DateTime<Utc>) -> f64 {
        let millis = (now - self.created_at).num_milliseconds() as f64;
        (millis / 3_600_000.0).max(0.0)
    }

    /// `success_count / access_count`, or 0.0 before any outcome report.
    pub fn success_rate(&self) -> f64 {
        if self.access_count == 0 {
            0.0
        } else {
            self.success_count as f64 / self.access_count as f64
        }
    }

    /// Whether `expires_at` has passed at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| e <= now)
    }
}

/// Identity equality: two artifacts are equal if they share a reference id.
/// Compare fields directly for structural comparison.
impl PartialEq for Artifact {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
