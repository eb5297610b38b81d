//! The [`MemoryBank`] facade: one owner for the storage engine, the
//! write-time scorer, the retrieval pipeline and the collector.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use engram_core::artifact::{
    decay_profile, Artifact, ArtifactState, OutputKind, TrustScore, TrustSignals,
};
use engram_core::config::{defaults, EngramConfig, GcPolicy};
use engram_core::errors::EngramResult;
use engram_core::models::{
    ArtifactQuery, GcSweepLog, IndexEntry, Outcome, ProducerRecord, RankedHit, SignalDeltas,
    TrustEvent, TrustEventKind,
};
use engram_core::traits::IArtifactStore;
use engram_gc::GcEngine;
use engram_retrieval::{LexicalScorer, RetrievalEngine};
use engram_storage::StorageEngine;
use engram_trust::{TrustScorer, TrustUpdateEngine};

/// What `store` hands back to the producer: the opaque reference and the
/// trust the scorer assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreReceipt {
    pub id: String,
    pub trust: TrustScore,
    pub signals: TrustSignals,
}

/// Aggregate view of the bank: artifact counts and the mean stored trust
/// across non-Deleted artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankStats {
    pub by_state: Vec<(ArtifactState, u64)>,
    pub by_kind: Vec<(OutputKind, u64)>,
    pub average_trust: f64,
}

/// The memory bank.
///
/// Owns the storage engine and the stateless domain engines; the
/// retrieval and trust-update engines borrow the store per call, so a
/// bank shared behind an `Arc` serves concurrent readers and writers
/// without further locking.
pub struct MemoryBank {
    storage: StorageEngine,
    scorer: TrustScorer,
    relevance: LexicalScorer,
    gc: GcEngine,
    config: EngramConfig,
}

impl MemoryBank {
    /// Open a bank as configured. A `storage.db_path` of `:memory:` opens
    /// a private in-memory bank.
    pub fn open(config: EngramConfig) -> EngramResult<Self> {
        let storage = StorageEngine::open(&config.storage)?;
        info!(db_path = %config.storage.db_path, "memory bank open");
        Ok(Self {
            storage,
            scorer: TrustScorer::new(&config.scoring),
            relevance: LexicalScorer::new(),
            gc: GcEngine::new(),
            config,
        })
    }

    /// In-memory bank with default configuration.
    pub fn open_in_memory() -> EngramResult<Self> {
        let mut config = EngramConfig::default();
        config.storage.db_path = ":memory:".to_string();
        Self::open(config)
    }

    pub fn config(&self) -> &EngramConfig {
        &self.config
    }

    /// Validate, score and persist one producer output, returning the
    /// reference id and initial trust.
    ///
    /// The artifact row, its index entries and the `initial` trust event
    /// commit in one transaction; a validation failure persists nothing.
    pub fn store(
        &self,
        record: &ProducerRecord,
        domain: Option<&str>,
        category: Option<&str>,
    ) -> EngramResult<StoreReceipt> {
        record.validate()?;
        let (signals, trust) = self.scorer.score(record);

        let profile = decay_profile(record.output_type);
        let now = Utc::now();
        let artifact = Artifact {
            id: uuid::Uuid::new_v4().to_string(),
            loop_id: record.loop_id.clone(),
            component: record.component.clone(),
            kind: record.output_type,
            result: record.result.clone(),
            domain: domain.map(str::to_string),
            category: category.map(str::to_string),
            tags: record.tags.clone(),
            trust,
            signals,
            decay_curve: profile.curve,
            half_life_hours: profile.half_life_hours,
            importance: record.importance.unwrap_or(defaults::DEFAULT_IMPORTANCE),
            access_count: 0,
            success_count: 0,
            failure_count: 0,
            last_accessed_at: None,
            constitutional_compliance: record.constitutional_compliance,
            requires_approval: record.requires_approval,
            state: ArtifactState::Active,
            version: 0,
            created_at: now,
            updated_at: now,
            expires_at: None,
        };

        let entries = IndexEntry::for_artifact(&artifact);
        let initial = TrustEvent::new(
            &artifact.id,
            TrustEventKind::Initial,
            0.0,
            trust.value(),
            SignalDeltas {
                provenance: signals.provenance,
                consensus: signals.consensus,
                governance: signals.governance,
                usage: signals.usage,
            },
            "system",
            "initial scoring",
        );
        self.storage.create(&artifact, &entries, &initial)?;
        debug!(
            artifact_id = %artifact.id,
            component = %artifact.component,
            trust = trust.value(),
            "artifact stored"
        );
        Ok(StoreReceipt {
            id: artifact.id,
            trust,
            signals,
        })
    }

    /// Ranked retrieval. Trust decay and ranking are computed fresh per
    /// call; nothing is mutated.
    pub fn read(&self, query: &ArtifactQuery) -> EngramResult<Vec<RankedHit>> {
        RetrievalEngine::new(&self.storage, &self.relevance, self.config.ranking).read(query)
    }

    /// Fetch one artifact by reference, any state, stored trust as-is.
    pub fn read_raw(&self, artifact_id: &str) -> EngramResult<Option<Artifact>> {
        self.storage.get(artifact_id)
    }

    /// Report a consumer outcome and return the new trust score.
    ///
    /// Retries version conflicts a bounded number of times; `NotFound`
    /// means the artifact was deleted since the caller read it.
    pub fn update_trust(
        &self,
        artifact_id: &str,
        outcome: Outcome,
        reason: Option<&str>,
        actor: Option<&str>,
    ) -> EngramResult<TrustScore> {
        self.updater().apply_outcome(artifact_id, outcome, reason, actor)
    }

    /// Manual operator correction by a signed delta. Audited, actor
    /// required.
    pub fn adjust_trust(
        &self,
        artifact_id: &str,
        delta: f64,
        reason: &str,
        actor: &str,
    ) -> EngramResult<TrustScore> {
        self.updater().adjust(artifact_id, delta, reason, actor)
    }

    /// The full audit history for an artifact, oldest first. Deleted
    /// artifacts keep their history.
    pub fn get_trust_history(&self, artifact_id: &str) -> EngramResult<Vec<TrustEvent>> {
        self.storage.trust_events(artifact_id)
    }

    /// Run one collector sweep under `policy` and return its log row.
    pub fn garbage_collect(&self, policy: &GcPolicy) -> EngramResult<GcSweepLog> {
        self.gc.sweep(&self.storage, policy)
    }

    /// Aggregate counts by state and kind plus the mean stored trust.
    pub fn stats(&self) -> EngramResult<BankStats> {
        Ok(BankStats {
            by_state: self.storage.count_by_state()?,
            by_kind: self.storage.count_by_kind()?,
            average_trust: self.storage.average_trust()?,
        })
    }

    /// Recent sweep log rows, newest first.
    pub fn sweep_history(&self, limit: usize) -> EngramResult<Vec<GcSweepLog>> {
        self.storage.sweep_history(limit)
    }

    fn updater(&self) -> TrustUpdateEngine<'_> {
        TrustUpdateEngine::new(&self.storage, self.config.update, self.config.scoring.weights)
    }
}
