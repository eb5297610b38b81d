use serde::{Deserialize, Serialize};

use crate::artifact::{Artifact, OutputKind};
use crate::config::defaults;

/// Structured retrieval query. There is no query language; set fields
/// compose conjunctively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactQuery {
    /// Free text handed to the relevance scorer. Without text every
    /// candidate scores relevance 1.0.
    pub text: Option<String>,
    /// Match the producing component.
    pub component: Option<String>,
    /// Match the output kind.
    pub kind: Option<OutputKind>,
    /// Match the domain label.
    pub domain: Option<String>,
    /// Match the category label.
    pub category: Option<String>,
    /// Drop candidates whose decayed trust (stored trust when `apply_decay`
    /// is off) falls below this.
    pub min_trust: Option<f64>,
    /// Only return artifacts attested constitutionally compliant.
    pub require_compliant: bool,
    /// Include Archived artifacts. Deleted artifacts are never returned.
    pub include_archived: bool,
    /// Maximum hits returned.
    pub k: usize,
    /// Apply read-time decay before trust filtering and ranking.
    pub apply_decay: bool,
}

impl Default for ArtifactQuery {
    fn default() -> Self {
        Self {
            text: None,
            component: None,
            kind: None,
            domain: None,
            category: None,
            min_trust: None,
            require_compliant: false,
            include_archived: false,
            k: defaults::DEFAULT_QUERY_K,
            apply_decay: true,
        }
    }
}

impl ArtifactQuery {
    /// Whether any indexed field (component/kind/domain/category) is set.
    pub fn has_index_terms(&self) -> bool {
        self.component.is_some()
            || self.kind.is_some()
            || self.domain.is_some()
            || self.category.is_some()
    }
}

/// One retrieval result with its ranking factor breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedHit {
    pub artifact: Artifact,
    /// Read-time decay factor in [0, 1]; 1.0 when decay was not applied.
    pub decay_factor: f64,
    /// Stored trust multiplied by the decay factor.
    pub decayed_trust: f64,
    pub relevance: f64,
    pub recency: f64,
    pub rank_score: f64,
}
