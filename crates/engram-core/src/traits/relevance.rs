use crate::artifact::Artifact;

/// Pluggable relevance scoring for retrieval.
///
/// Implementations return a score in [0.0, 1.0]; the ranking engine treats
/// the value as opaque and never inspects how it was produced. Embedding
/// or lexical backends both fit behind this trait.
pub trait IRelevanceScorer: Send + Sync {
    fn score(&self, query_text: &str, artifact: &Artifact) -> f64;
}
