use serde::{Deserialize, Serialize};

/// The seven output kinds producers can store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    Reasoning,
    Decision,
    Reflection,
    Observation,
    Action,
    Prediction,
    Generation,
}

impl OutputKind {
    /// Total number of output kinds.
    pub const COUNT: usize = 7;

    /// All variants for iteration.
    pub const ALL: [OutputKind; 7] = [
        Self::Reasoning,
        Self::Decision,
        Self::Reflection,
        Self::Observation,
        Self::Action,
        Self::Prediction,
        Self::Generation,
    ];

    /// Wire/database name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reasoning => "reasoning",
            Self::Decision => "decision",
            Self::Reflection => "reflection",
            Self::Observation => "observation",
            Self::Action => "action",
            Self::Prediction => "prediction",
            Self::Generation => "generation",
        }
    }

    /// Parse a wire name. Unknown names are a validation failure for the
    /// caller; there is no catch-all kind.
    pub fn parse(s: &str) -> Option<OutputKind> {
        match s {
            "reasoning" => Some(Self::Reasoning),
            "decision" => Some(Self::Decision),
            "reflection" => Some(Self::Reflection),
            "observation" => Some(Self::Observation),
            "action" => Some(Self::Action),
            "prediction" => Some(Self::Prediction),
            "generation" => Some(Self::Generation),
            _ => None,
        }
    }
}

/// The decay curve shapes. Exhaustive: adding a curve is a compile-time
/// change, not a string convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecayCurve {
    Hyperbolic,
    Exponential,
    Linear,
}

impl DecayCurve {
    /// All variants for iteration.
    pub const ALL: [DecayCurve; 3] = [Self::Hyperbolic, Self::Exponential, Self::Linear];

    /// Wire/database name for this curve.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hyperbolic => "hyperbolic",
            Self::Exponential => "exponential",
            Self::Linear => "linear",
        }
    }

    /// Parse a wire name.
    pub fn parse(s: &str) -> Option<DecayCurve> {
        match s {
            "hyperbolic" => Some(Self::Hyperbolic),
            "exponential" => Some(Self::Exponential),
            "linear" => Some(Self::Linear),
            _ => None,
        }
    }
}

/// Decay curve and half-life assigned to an artifact at creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayProfile {
    pub curve: DecayCurve,
    pub half_life_hours: f64,
}

/// Decay profile for each output kind.
///
/// Fixed at write time: a later change to this table never retroactively
/// reshapes artifacts already stored.
pub fn decay_profile(kind: OutputKind) -> DecayProfile {
    let (curve, half_life_hours) = match kind {
        OutputKind::Reasoning => (DecayCurve::Hyperbolic, 168.0),
        OutputKind::Decision => (DecayCurve::Hyperbolic, 120.0),
        OutputKind::Reflection => (DecayCurve::Hyperbolic, 240.0),
        OutputKind::Observation => (DecayCurve::Linear, 48.0),
        OutputKind::Generation => (DecayCurve::Linear, 24.0),
        OutputKind::Action => (DecayCurve::Exponential, 72.0),
        OutputKind::Prediction => (DecayCurve::Exponential, 96.0),
    };
    DecayProfile {
        curve,
        half_life_hours,
    }
}
