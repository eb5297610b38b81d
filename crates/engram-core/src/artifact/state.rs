use serde::{Deserialize, Serialize};

/// Artifact lifecycle state.
///
/// Transitions are forward-only: `Active -> Archived -> Deleted`. There is
/// no restore path and no skip; a deletion always passes through Archived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactState {
    Active,
    Archived,
    Deleted,
}

impl ArtifactState {
    /// All variants for iteration.
    pub const ALL: [ArtifactState; 3] = [Self::Active, Self::Archived, Self::Deleted];

    /// Wire/database name for this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
            Self::Deleted => "deleted",
        }
    }

    /// Parse a wire name.
    pub fn parse(s: &str) -> Option<ArtifactState> {
        match s {
            "active" => Some(Self::Active),
            "archived" => Some(Self::Archived),
            "deleted" => Some(Self::Deleted),
            _ => None,
        }
    }

    /// Whether the forward-only state machine permits `self -> next`.
    pub fn can_transition_to(self, next: ArtifactState) -> bool {
        matches!(
            (self, next),
            (Self::Active, Self::Archived) | (Self::Archived, Self::Deleted)
        )
    }
}
