use serde::{Deserialize, Serialize};

use super::defaults;

/// Outcome-driven trust update configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustUpdateConfig {
    /// Base success boost: `boost / (1 + success_count * damping)`.
    pub success_boost: f64,
    pub success_damping: f64,
    /// Base failure penalty magnitude: `penalty / (1 + failure_count * damping)`.
    pub failure_penalty: f64,
    pub failure_damping: f64,
    /// Flat bonus for consistently successful artifacts.
    pub consistency_bonus: f64,
    /// Bonus applies above this access count...
    pub consistency_min_access: u64,
    /// ...and above this success rate.
    pub consistency_min_rate: f64,
    /// Usage signal blend: success-rate share and volume share.
    pub usage_rate_weight: f64,
    pub usage_volume_weight: f64,
    /// Access count at which the volume term saturates.
    pub usage_saturation: f64,
    /// CAS attempts before surfacing Conflict.
    pub max_attempts: u32,
}

impl Default for TrustUpdateConfig {
    fn default() -> Self {
        Self {
            success_boost: defaults::DEFAULT_SUCCESS_BOOST,
            success_damping: defaults::DEFAULT_SUCCESS_DAMPING,
            failure_penalty: defaults::DEFAULT_FAILURE_PENALTY,
            failure_damping: defaults::DEFAULT_FAILURE_DAMPING,
            consistency_bonus: defaults::DEFAULT_CONSISTENCY_BONUS,
            consistency_min_access: defaults::DEFAULT_CONSISTENCY_MIN_ACCESS,
            consistency_min_rate: defaults::DEFAULT_CONSISTENCY_MIN_RATE,
            usage_rate_weight: defaults::DEFAULT_USAGE_RATE_WEIGHT,
            usage_volume_weight: defaults::DEFAULT_USAGE_VOLUME_WEIGHT,
            usage_saturation: defaults::DEFAULT_USAGE_SATURATION,
            max_attempts: defaults::DEFAULT_MAX_UPDATE_ATTEMPTS,
        }
    }
}
