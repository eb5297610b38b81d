use serde::{Deserialize, Serialize};

use crate::artifact::OutputKind;
use crate::errors::{EngramError, EngramResult};

/// What a producer hands to `store`. The result payload is opaque; every
/// other field feeds validation and initial trust scoring.
///
/// A record arriving without an `output_type` fails deserialization before
/// it reaches validation; both paths are synchronous rejections and persist
/// nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProducerRecord {
    /// Producer loop identifier.
    pub loop_id: String,
    /// Producing component name. Scored against the reputation table.
    pub component: String,
    /// Output kind; fixes the decay profile.
    pub output_type: OutputKind,
    /// Opaque result payload.
    pub result: serde_json::Value,
    /// Free-form tags, each indexed as a tag entry.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Producer self-confidence in [0, 1].
    pub confidence: f64,
    /// Optional upstream quality score in [0, 1]; consensus falls back to
    /// confidence when absent.
    #[serde(default)]
    pub quality_score: Option<f64>,
    /// Constitutional compliance attestation.
    pub constitutional_compliance: bool,
    #[serde(default)]
    pub requires_approval: bool,
    /// Errors the producer hit while generating the result.
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub policy_violation: bool,
    #[serde(default)]
    pub policy_review: bool,
    /// Importance hint in [0, 1]; defaults to 0.5 when absent.
    #[serde(default)]
    pub importance: Option<f64>,
}

impl ProducerRecord {
    /// Validate the record before scoring. Rejection is synchronous and
    /// nothing is persisted on failure.
    pub fn validate(&self) -> EngramResult<()> {
        if self.component.trim().is_empty() {
            return Err(EngramError::Validation(
                "producer record missing component".to_string(),
            ));
        }
        if self.loop_id.trim().is_empty() {
            return Err(EngramError::Validation(
                "producer record missing loop_id".to_string(),
            ));
        }
        check_unit("confidence", self.confidence)?;
        if let Some(q) = self.quality_score {
            check_unit("quality_score", q)?;
        }
        if let Some(i) = self.importance {
            check_unit("importance", i)?;
        }
        Ok(())
    }
}

fn check_unit(field: &str, value: f64) -> EngramResult<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(EngramError::Validation(format!(
            "{field} must be within [0.0, 1.0], got {value}"
        )));
    }
    Ok(())
}
