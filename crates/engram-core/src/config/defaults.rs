// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "engram.db";
pub const DEFAULT_WAL_MODE: bool = true;
pub const DEFAULT_CACHE_SIZE: i64 = -64_000; // 64 MB (negative = KB)
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Trust scoring ---
pub const DEFAULT_PROVENANCE_WEIGHT: f64 = 0.30;
pub const DEFAULT_CONSENSUS_WEIGHT: f64 = 0.25;
pub const DEFAULT_GOVERNANCE_WEIGHT: f64 = 0.30;
pub const DEFAULT_USAGE_WEIGHT: f64 = 0.15;
pub const DEFAULT_REPUTATION: f64 = 0.70;
pub const DEFAULT_REPUTATION_BLEND: f64 = 0.6;
pub const DEFAULT_CONFIDENCE_BLEND: f64 = 0.4;
pub const DEFAULT_NONCOMPLIANT_GOVERNANCE: f64 = 0.3;
pub const DEFAULT_APPROVAL_PENALTY: f64 = 0.8;
pub const DEFAULT_ERROR_PENALTY: f64 = 0.7;
pub const DEFAULT_VIOLATION_PENALTY: f64 = 0.5;
pub const DEFAULT_REVIEW_PENALTY: f64 = 0.8;

// --- Trust updates ---
pub const DEFAULT_SUCCESS_BOOST: f64 = 0.05;
pub const DEFAULT_SUCCESS_DAMPING: f64 = 0.1;
pub const DEFAULT_FAILURE_PENALTY: f64 = 0.08;
pub const DEFAULT_FAILURE_DAMPING: f64 = 0.05;
pub const DEFAULT_CONSISTENCY_BONUS: f64 = 0.02;
pub const DEFAULT_CONSISTENCY_MIN_ACCESS: u64 = 5;
pub const DEFAULT_CONSISTENCY_MIN_RATE: f64 = 0.8;
pub const DEFAULT_USAGE_RATE_WEIGHT: f64 = 0.7;
pub const DEFAULT_USAGE_VOLUME_WEIGHT: f64 = 0.3;
pub const DEFAULT_USAGE_SATURATION: f64 = 20.0;
pub const DEFAULT_MAX_UPDATE_ATTEMPTS: u32 = 3;

// --- Ranking ---
pub const DEFAULT_TRUST_RANK_WEIGHT: f64 = 0.40;
pub const DEFAULT_RELEVANCE_RANK_WEIGHT: f64 = 0.35;
pub const DEFAULT_RECENCY_RANK_WEIGHT: f64 = 0.15;
pub const DEFAULT_IMPORTANCE_RANK_WEIGHT: f64 = 0.10;
pub const DEFAULT_RECENCY_SCALE_HOURS: f64 = 168.0; // 1 week
pub const DEFAULT_IMPORTANCE: f64 = 0.5;
pub const DEFAULT_QUERY_K: usize = 10;

// --- Garbage collection ---
pub const DEFAULT_GC_POLICY_NAME: &str = "default";
pub const DEFAULT_GC_MIN_TRUST: f64 = 0.2;
pub const DEFAULT_GC_DELETE_THRESHOLD: f64 = 0.1;
pub const DEFAULT_GC_MAX_AGE_HOURS: f64 = 2_160.0; // 90 days
pub const DEFAULT_GC_INTERVAL_SECS: u64 = 3_600; // 1 hour
