//! RetrievalEngine: gather candidates, filter, blend rank factors, top-k.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::debug;

use engram_core::artifact::{Artifact, ArtifactState};
use engram_core::config::RankingConfig;
use engram_core::errors::EngramResult;
use engram_core::models::{ArtifactQuery, IndexEntry, IndexKind, RankedHit};
use engram_core::traits::{IArtifactStore, IRelevanceScorer};
use engram_decay::DecayEngine;

/// The read engine. Borrows the store and a relevance scorer; holds no
/// state of its own beyond configuration, so a read can never leave
/// anything behind.
pub struct RetrievalEngine<'a> {
    store: &'a dyn IArtifactStore,
    scorer: &'a dyn IRelevanceScorer,
    decay: DecayEngine,
    config: RankingConfig,
}

impl<'a> RetrievalEngine<'a> {
    pub fn new(
        store: &'a dyn IArtifactStore,
        scorer: &'a dyn IRelevanceScorer,
        config: RankingConfig,
    ) -> Self {
        Self {
            store,
            scorer,
            decay: DecayEngine::new(),
            config,
        }
    }

    /// Execute a query: gather → filter → score → sort → truncate to `k`.
    ///
    /// Ties on rank score go to the most recently created artifact.
    pub fn read(&self, query: &ArtifactQuery) -> EngramResult<Vec<RankedHit>> {
        let candidates = self.gather(query)?;
        if candidates.is_empty() {
            debug!("no candidates gathered");
            return Ok(Vec::new());
        }
        debug!(candidates = candidates.len(), "gathered candidates");

        let now = Utc::now();
        let mut hits: Vec<RankedHit> = candidates
            .into_iter()
            .filter(|artifact| self.passes_state(artifact, query))
            .filter(|artifact| !query.require_compliant || artifact.constitutional_compliance)
            .filter_map(|artifact| self.score_candidate(artifact, query, now))
            .collect();

        hits.sort_by(|a, b| {
            b.rank_score
                .partial_cmp(&a.rank_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.artifact.created_at.cmp(&a.artifact.created_at))
        });
        hits.truncate(query.k);

        debug!(hits = hits.len(), k = query.k, "read complete");
        Ok(hits)
    }

    /// Candidate gathering. Index terms intersect conjunctively; a query
    /// without index terms falls back to a state listing.
    fn gather(&self, query: &ArtifactQuery) -> EngramResult<Vec<Artifact>> {
        if !query.has_index_terms() {
            return self.store.query_by_state(&self.allowed_states(query));
        }

        let mut listings: Vec<Vec<String>> = Vec::new();
        if let Some(component) = &query.component {
            listings.push(self.store.lookup_index(IndexKind::Component, component)?);
        }
        if let Some(kind) = query.kind {
            listings.push(self.store.lookup_index(IndexKind::Keyword, kind.as_str())?);
        }
        if let Some(domain) = &query.domain {
            listings.push(
                self.store
                    .lookup_index(IndexKind::Concept, &IndexEntry::domain_concept(domain))?,
            );
        }
        if let Some(category) = &query.category {
            listings.push(
                self.store
                    .lookup_index(IndexKind::Concept, &IndexEntry::category_concept(category))?,
            );
        }

        // Intersect, keeping the first listing's order.
        let mut ids = listings.remove(0);
        for other in &listings {
            let keep: HashSet<&str> = other.iter().map(String::as_str).collect();
            ids.retain(|id| keep.contains(id.as_str()));
        }
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.store.get_bulk(&ids)
    }

    fn allowed_states(&self, query: &ArtifactQuery) -> Vec<ArtifactState> {
        if query.include_archived {
            vec![ArtifactState::Active, ArtifactState::Archived]
        } else {
            vec![ArtifactState::Active]
        }
    }

    fn passes_state(&self, artifact: &Artifact, query: &ArtifactQuery) -> bool {
        match artifact.state {
            ArtifactState::Active => true,
            ArtifactState::Archived => query.include_archived,
            ArtifactState::Deleted => false,
        }
    }

    /// Apply decay and the trust filter, then blend the rank factors.
    /// Returns `None` when the candidate falls below `min_trust`.
    fn score_candidate(
        &self,
        artifact: Artifact,
        query: &ArtifactQuery,
        now: DateTime<Utc>,
    ) -> Option<RankedHit> {
        let (decay_factor, decayed_trust) = if query.apply_decay {
            let breakdown = self.decay.breakdown(&artifact, now);
            (breakdown.decay_factor, breakdown.decayed_trust)
        } else {
            (1.0, artifact.trust.value())
        };

        if let Some(min_trust) = query.min_trust {
            if decayed_trust < min_trust {
                return None;
            }
        }

        let relevance = match query.text.as_deref() {
            Some(text) if !text.trim().is_empty() => {
                self.scorer.score(text, &artifact).clamp(0.0, 1.0)
            }
            _ => 1.0,
        };
        let recency = 1.0 / (1.0 + artifact.age_hours(now) / self.config.recency_scale_hours);
        let rank_score = decayed_trust * self.config.trust_weight
            + relevance * self.config.relevance_weight
            + recency * self.config.recency_weight
            + artifact.importance * self.config.importance_weight;

        Some(RankedHit {
            artifact,
            decay_factor,
            decayed_trust,
            relevance,
            recency,
            rank_score,
        })
    }
}
