use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval ranking configuration. The four blend weights nominally sum
/// to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub trust_weight: f64,
    pub relevance_weight: f64,
    pub recency_weight: f64,
    pub importance_weight: f64,
    /// Recency is `1 / (1 + age_hours / scale)`.
    pub recency_scale_hours: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            trust_weight: defaults::DEFAULT_TRUST_RANK_WEIGHT,
            relevance_weight: defaults::DEFAULT_RELEVANCE_RANK_WEIGHT,
            recency_weight: defaults::DEFAULT_RECENCY_RANK_WEIGHT,
            importance_weight: defaults::DEFAULT_IMPORTANCE_RANK_WEIGHT,
            recency_scale_hours: defaults::DEFAULT_RECENCY_SCALE_HOURS,
        }
    }
}
