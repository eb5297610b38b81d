//! TrustScorer: initial trust for newly stored outputs.
//!
//! Four signals, each in [0, 1], blended under the configured weights:
//!
//! ```text
//! provenance = reputation(component) * 0.6 + confidence * 0.4
//! consensus  = quality_score, falling back to confidence
//! governance = compliance base, then compounding penalty multipliers
//! usage      = 0.0 at creation (no consumption history yet)
//! trust      = p*0.30 + c*0.25 + g*0.30 + u*0.15, clamped
//! ```
//!
//! Governance penalties compound rather than saturate: an output that
//! requires approval and also reported errors lands at 1.0 × 0.8 × 0.7.

use tracing::debug;

use engram_core::config::ScoringConfig;
use engram_core::models::ProducerRecord;
use engram_core::{TrustScore, TrustSignals};

/// Computes the initial signals and trust score for a producer record.
pub struct TrustScorer {
    config: ScoringConfig,
}

impl TrustScorer {
    /// Create a new TrustScorer with the given config.
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Get the config.
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a validated producer record.
    ///
    /// # Examples
    ///
    /// ```
    /// use engram_core::config::ScoringConfig;
    /// use engram_core::models::ProducerRecord;
    /// use engram_core::OutputKind;
    /// use engram_trust::TrustScorer;
    ///
    /// let record = ProducerRecord {
    ///     loop_id: "loop-7".to_string(),
    ///     component: "reflection".to_string(),
    ///     output_type: OutputKind::Reflection,
    ///     result: serde_json::json!({"insight": "retry storms follow cold caches"}),
    ///     tags: vec![],
    ///     confidence: 0.9,
    ///     quality_score: Some(0.85),
    ///     constitutional_compliance: true,
    ///     requires_approval: false,
    ///     errors: vec![],
    ///     policy_violation: false,
    ///     policy_review: false,
    ///     importance: None,
    /// };
    ///
    /// let (signals, trust) = TrustScorer::new(&ScoringConfig::default()).score(&record);
    /// // provenance = 0.85*0.6 + 0.9*0.4 = 0.87; consensus = 0.85; governance = 1.0
    /// assert!((signals.provenance - 0.87).abs() < 1e-9);
    /// assert!((trust.value() - 0.7735).abs() < 1e-9);
    /// ```
    pub fn score(&self, record: &ProducerRecord) -> (TrustSignals, TrustScore) {
        let provenance = self.provenance(record);
        let consensus = record.quality_score.unwrap_or(record.confidence);
        let governance = self.governance(record);

        let signals = TrustSignals::new(provenance, consensus, governance, 0.0);
        let trust = signals.weighted_total(&self.config.weights);

        debug!(
            component = %record.component,
            provenance,
            consensus,
            governance,
            trust = %trust,
            "scored producer record"
        );
        (signals, trust)
    }

    /// Reputation-weighted provenance: how much the producing component's
    /// track record and stated confidence vouch for the output.
    fn provenance(&self, record: &ProducerRecord) -> f64 {
        let reputation = self.config.reputation(&record.component);
        reputation * self.config.reputation_blend + record.confidence * self.config.confidence_blend
    }

    /// Compliance base with compounding penalty multipliers.
    fn governance(&self, record: &ProducerRecord) -> f64 {
        let mut governance = if record.constitutional_compliance {
            1.0
        } else {
            self.config.noncompliant_governance
        };
        if record.requires_approval {
            governance *= self.config.approval_penalty;
        }
        if !record.errors.is_empty() {
            governance *= self.config.error_penalty;
        }
        if record.policy_violation {
            governance *= self.config.violation_penalty;
        }
        if record.policy_review {
            governance *= self.config.review_penalty;
        }
        governance
    }
}
