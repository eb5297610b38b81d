use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of trust change an event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustEventKind {
    /// Creation-time scoring.
    Initial,
    /// Positive outcome report.
    Success,
    /// Negative outcome report.
    Failure,
    /// Collector looked at the artifact and transitioned it.
    DecayInspection,
    /// Operator-supplied explicit delta.
    Manual,
}

impl TrustEventKind {
    /// All variants for iteration.
    pub const ALL: [TrustEventKind; 5] = [
        Self::Initial,
        Self::Success,
        Self::Failure,
        Self::DecayInspection,
        Self::Manual,
    ];

    /// Wire/database name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Success => "success",
            Self::Failure => "failure",
            Self::DecayInspection => "decay_inspection",
            Self::Manual => "manual",
        }
    }

    /// Parse a wire name.
    pub fn parse(s: &str) -> Option<TrustEventKind> {
        match s {
            "initial" => Some(Self::Initial),
            "success" => Some(Self::Success),
            "failure" => Some(Self::Failure),
            "decay_inspection" => Some(Self::DecayInspection),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }
}

/// A consumer's report on how an artifact worked out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failure,
}

/// Per-signal change recorded on an event. Deltas may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SignalDeltas {
    pub provenance: f64,
    pub consensus: f64,
    pub governance: f64,
    pub usage: f64,
}

/// Append-only audit record for every trust change.
///
/// Events are never updated and never deleted, even when their artifact is
/// hard-deleted: replaying an artifact's events reconstructs its cached
/// trust score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustEvent {
    /// UUID v4 event id.
    pub id: String,
    pub artifact_id: String,
    pub kind: TrustEventKind,
    pub old_trust: f64,
    pub new_trust: f64,
    /// `new_trust - old_trust`, after clamping.
    pub delta: f64,
    pub signal_deltas: SignalDeltas,
    /// Who triggered the change. `"system"` when unattributed.
    pub actor: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl TrustEvent {
    /// Build an event with a fresh id and timestamp.
    pub fn new(
        artifact_id: &str,
        kind: TrustEventKind,
        old_trust: f64,
        new_trust: f64,
        signal_deltas: SignalDeltas,
        actor: &str,
        reason: &str,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            artifact_id: artifact_id.to_string(),
            kind,
            old_trust,
            new_trust,
            delta: new_trust - old_trust,
            signal_deltas,
            actor: actor.to_string(),
            reason: reason.to_string(),
            created_at: Utc::now(),
        }
    }
}
