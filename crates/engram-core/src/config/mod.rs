//! Configuration: serde structs with compiled defaults, loadable from TOML.
//! Every tunable in the scoring, ranking, update and collection paths is
//! explicit configuration.

pub mod defaults;

mod gc_config;
mod ranking_config;
mod scoring_config;
mod storage_config;
mod update_config;

pub use gc_config::{GcConfig, GcPolicy};
pub use ranking_config::RankingConfig;
pub use scoring_config::{ScoringConfig, SignalWeights};
pub use storage_config::StorageConfig;
pub use update_config::TrustUpdateConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{EngramError, EngramResult};

/// Top-level configuration aggregating all sub-configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngramConfig {
    pub storage: StorageConfig,
    pub scoring: ScoringConfig,
    pub ranking: RankingConfig,
    pub update: TrustUpdateConfig,
    pub gc: GcConfig,
}

impl EngramConfig {
    /// Load configuration from a TOML string. Missing sections fall back
    /// to compiled defaults; unknown keys are ignored.
    pub fn from_toml(toml_str: &str) -> EngramResult<Self> {
        toml::from_str(toml_str).map_err(|e| EngramError::Config(format!("parse config: {e}")))
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &std::path::Path) -> EngramResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| EngramError::Config(format!("read {}: {e}", path.display())))?;
        Self::from_toml(&raw)
    }
}
