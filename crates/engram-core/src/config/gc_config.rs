use serde::{Deserialize, Serialize};

use super::defaults;

/// A sweep policy. Both trust thresholds compare against read-time decayed
/// trust, never the stored score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GcPolicy {
    pub name: String,
    /// Archive Active artifacts below this decayed trust.
    pub min_trust_threshold: f64,
    /// Hard-delete artifacts below this decayed trust.
    pub delete_threshold: f64,
    /// Archive Active artifacts older than this regardless of trust.
    pub max_age_hours: f64,
    /// Evaluate and log without mutating anything.
    pub dry_run: bool,
}

impl Default for GcPolicy {
    fn default() -> Self {
        Self {
            name: defaults::DEFAULT_GC_POLICY_NAME.to_string(),
            min_trust_threshold: defaults::DEFAULT_GC_MIN_TRUST,
            delete_threshold: defaults::DEFAULT_GC_DELETE_THRESHOLD,
            max_age_hours: defaults::DEFAULT_GC_MAX_AGE_HOURS,
            dry_run: false,
        }
    }
}

/// Collector configuration: the default sweep policy plus the scheduler
/// interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GcConfig {
    pub policy: GcPolicy,
    pub sweep_interval_secs: u64,
}

impl Default for GcConfig {
    fn default() -> Self {
        Self {
            policy: GcPolicy::default(),
            sweep_interval_secs: defaults::DEFAULT_GC_INTERVAL_SECS,
        }
    }
}
