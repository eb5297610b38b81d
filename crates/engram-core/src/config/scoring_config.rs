use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Weights for combining the four trust signals. Nominally sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalWeights {
    pub provenance: f64,
    pub consensus: f64,
    pub governance: f64,
    pub usage: f64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            provenance: defaults::DEFAULT_PROVENANCE_WEIGHT,
            consensus: defaults::DEFAULT_CONSENSUS_WEIGHT,
            governance: defaults::DEFAULT_GOVERNANCE_WEIGHT,
            usage: defaults::DEFAULT_USAGE_WEIGHT,
        }
    }
}

/// Initial trust scoring configuration. Every knob in the scoring path
/// lives here; there are no hidden constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: SignalWeights,
    /// Reputation share of the provenance signal.
    pub reputation_blend: f64,
    /// Confidence share of the provenance signal.
    pub confidence_blend: f64,
    /// Reputation for components absent from the table.
    pub default_reputation: f64,
    /// Per-component reputation overrides, consulted before the built-in
    /// table.
    pub reputation_overrides: HashMap<String, f64>,
    /// Governance base for artifacts without a compliance attestation.
    pub noncompliant_governance: f64,
    /// Compounding governance multipliers.
    pub approval_penalty: f64,
    pub error_penalty: f64,
    pub violation_penalty: f64,
    pub review_penalty: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: SignalWeights::default(),
            reputation_blend: defaults::DEFAULT_REPUTATION_BLEND,
            confidence_blend: defaults::DEFAULT_CONFIDENCE_BLEND,
            default_reputation: defaults::DEFAULT_REPUTATION,
            reputation_overrides: HashMap::new(),
            noncompliant_governance: defaults::DEFAULT_NONCOMPLIANT_GOVERNANCE,
            approval_penalty: defaults::DEFAULT_APPROVAL_PENALTY,
            error_penalty: defaults::DEFAULT_ERROR_PENALTY,
            violation_penalty: defaults::DEFAULT_VIOLATION_PENALTY,
            review_penalty: defaults::DEFAULT_REVIEW_PENALTY,
        }
    }
}

impl ScoringConfig {
    /// Reputation for a component: override first, then the built-in
    /// table, then the configured default.
    pub fn reputation(&self, component: &str) -> f64 {
        if let Some(r) = self.reputation_overrides.get(component) {
            return *r;
        }
        builtin_reputation(component).unwrap_or(self.default_reputation)
    }
}

/// Built-in component reputation table.
fn builtin_reputation(component: &str) -> Option<f64> {
    Some(match component {
        "governance" => 0.95,
        "parliament" => 0.93,
        "quorum" => 0.92,
        "hunter" => 0.90,
        "specialist" => 0.88,
        "reflection" | "causal" => 0.85,
        "meta" => 0.80,
        "temporal" => 0.75,
        _ => return None,
    })
}
