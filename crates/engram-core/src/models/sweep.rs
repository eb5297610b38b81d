use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::GcPolicy;

/// One row per collector sweep, written even when the sweep fails partway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GcSweepLog {
    /// UUID v4 sweep id.
    pub id: String,
    pub policy_name: String,
    /// Artifacts evaluated.
    pub scanned: u64,
    /// Active artifacts transitioned to Archived.
    pub archived: u64,
    /// Artifacts transitioned to Deleted (payload purged).
    pub deleted: u64,
    /// Artifacts skipped because a concurrent writer won the version race.
    pub skipped: u64,
    pub min_trust_threshold: f64,
    pub delete_threshold: f64,
    pub max_age_hours: f64,
    pub dry_run: bool,
    /// Set when the store failed mid-sweep. Counts reflect completed work;
    /// completed transitions are never rolled back.
    pub error: Option<String>,
    pub duration_ms: u64,
    pub created_at: DateTime<Utc>,
}

impl GcSweepLog {
    /// Start a log for a sweep under `policy` with zeroed counters.
    pub fn begin(policy: &GcPolicy) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            policy_name: policy.name.clone(),
            scanned: 0,
            archived: 0,
            deleted: 0,
            skipped: 0,
            min_trust_threshold: policy.min_trust_threshold,
            delete_threshold: policy.delete_threshold,
            max_age_hours: policy.max_age_hours,
            dry_run: policy.dry_run,
            error: None,
            duration_ms: 0,
            created_at: Utc::now(),
        }
    }
}
