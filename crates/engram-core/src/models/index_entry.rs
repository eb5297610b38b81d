use serde::{Deserialize, Serialize};

use crate::artifact::Artifact;

/// Secondary index entry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    Keyword,
    Tag,
    Concept,
    Component,
}

impl IndexKind {
    /// All variants for iteration.
    pub const ALL: [IndexKind; 4] = [Self::Keyword, Self::Tag, Self::Concept, Self::Component];

    /// Wire/database name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Tag => "tag",
            Self::Concept => "concept",
            Self::Component => "component",
        }
    }

    /// Parse a wire name.
    pub fn parse(s: &str) -> Option<IndexKind> {
        match s {
            "keyword" => Some(Self::Keyword),
            "tag" => Some(Self::Tag),
            "concept" => Some(Self::Concept),
            "component" => Some(Self::Component),
            _ => None,
        }
    }
}

/// One secondary index row. Written at store time, never mutated in place,
/// and removed only when its artifact is hard-deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub artifact_id: String,
    pub kind: IndexKind,
    pub value: String,
    pub weight: f64,
}

impl IndexEntry {
    pub const COMPONENT_WEIGHT: f64 = 1.0;
    pub const KEYWORD_WEIGHT: f64 = 1.0;
    pub const CONCEPT_WEIGHT: f64 = 0.9;
    pub const TAG_WEIGHT: f64 = 0.7;

    pub fn new(artifact_id: &str, kind: IndexKind, value: &str, weight: f64) -> Self {
        Self {
            artifact_id: artifact_id.to_string(),
            kind,
            value: value.to_string(),
            weight,
        }
    }

    /// Concept value for a domain label. Domain and category share the
    /// concept index, so values are namespaced to keep lookups precise.
    pub fn domain_concept(domain: &str) -> String {
        format!("domain:{domain}")
    }

    /// Concept value for a category label.
    pub fn category_concept(category: &str) -> String {
        format!("category:{category}")
    }

    /// Build the index entries for an artifact: its component, its output
    /// kind as a keyword, domain/category as concepts, one entry per tag.
    pub fn for_artifact(artifact: &Artifact) -> Vec<IndexEntry> {
        let mut entries = vec![
            Self::new(
                &artifact.id,
                IndexKind::Component,
                &artifact.component,
                Self::COMPONENT_WEIGHT,
            ),
            Self::new(
                &artifact.id,
                IndexKind::Keyword,
                artifact.kind.as_str(),
                Self::KEYWORD_WEIGHT,
            ),
        ];
        if let Some(domain) = &artifact.domain {
            entries.push(Self::new(
                &artifact.id,
                IndexKind::Concept,
                &Self::domain_concept(domain),
                Self::CONCEPT_WEIGHT,
            ));
        }
        if let Some(category) = &artifact.category {
            entries.push(Self::new(
                &artifact.id,
                IndexKind::Concept,
                &Self::category_concept(category),
                Self::CONCEPT_WEIGHT,
            ));
        }
        for tag in &artifact.tags {
            entries.push(Self::new(
                &artifact.id,
                IndexKind::Tag,
                tag,
                Self::TAG_WEIGHT,
            ));
        }
        entries
    }
}
