//! Default lexical relevance scorer.
//!
//! Token overlap between the query text and the artifact's metadata
//! (component, kind, domain, category, tags, loop id). The payload itself
//! is never inspected; the bank treats results as opaque.

use std::collections::HashSet;

use engram_core::artifact::Artifact;
use engram_core::traits::IRelevanceScorer;

/// Case-insensitive token-overlap scorer. Scores are
/// `|query ∩ metadata| / |query|`, so a query fully covered by the
/// artifact's metadata scores 1.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalScorer;

impl LexicalScorer {
    pub fn new() -> Self {
        Self
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

impl IRelevanceScorer for LexicalScorer {
    fn score(&self, query_text: &str, artifact: &Artifact) -> f64 {
        let query_tokens: HashSet<String> = tokenize(query_text).collect();
        if query_tokens.is_empty() {
            return 1.0;
        }

        let mut haystack: HashSet<String> = tokenize(&artifact.component).collect();
        haystack.extend(tokenize(artifact.kind.as_str()));
        haystack.extend(tokenize(&artifact.loop_id));
        if let Some(domain) = &artifact.domain {
            haystack.extend(tokenize(domain));
        }
        if let Some(category) = &artifact.category {
            haystack.extend(tokenize(category));
        }
        for tag in &artifact.tags {
            haystack.extend(tokenize(tag));
        }

        let overlap = query_tokens.intersection(&haystack).count();
        overlap as f64 / query_tokens.len() as f64
    }
}
