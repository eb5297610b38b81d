//! GcEngine: single-flight policy sweeps over the artifact store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use engram_core::artifact::{Artifact, ArtifactState};
use engram_core::config::GcPolicy;
use engram_core::errors::{EngramError, EngramResult};
use engram_core::models::{GcSweepLog, SignalDeltas, TrustEvent, TrustEventKind};
use engram_core::traits::IArtifactStore;
use engram_decay::DecayEngine;

/// What the policy says should happen to one artifact.
enum Verdict {
    Keep,
    Archive { reason: String },
    Delete { reason: String },
}

/// The collector.
///
/// Stateless between sweeps apart from the single-flight guard. Counters
/// on the sweep log count transitions, so an Active artifact hard-deleted
/// in one sweep shows up under both `archived` and `deleted`.
pub struct GcEngine {
    /// Guard: only one sweep can run at a time.
    is_running: Arc<AtomicBool>,
    decay: DecayEngine,
}

impl GcEngine {
    pub fn new() -> Self {
        Self {
            is_running: Arc::new(AtomicBool::new(false)),
            decay: DecayEngine::new(),
        }
    }

    /// Whether a sweep is currently in flight.
    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }

    /// Run one sweep under `policy` and persist its log row.
    ///
    /// A second caller while a sweep is in flight gets `SweepInProgress`.
    /// The log row is written even when the store failed mid-sweep; only a
    /// failure to write the row itself surfaces as an error.
    pub fn sweep(
        &self,
        store: &dyn IArtifactStore,
        policy: &GcPolicy,
    ) -> EngramResult<GcSweepLog> {
        if self
            .is_running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(EngramError::SweepInProgress);
        }

        let started = Instant::now();
        let mut log = self.evaluate(store, policy);
        log.duration_ms = started.elapsed().as_millis() as u64;

        // Release the guard.
        self.is_running.store(false, Ordering::SeqCst);

        store.record_sweep(&log)?;
        if let Some(error) = &log.error {
            warn!(sweep_id = %log.id, error = %error, "sweep ended early");
        }
        info!(
            sweep_id = %log.id,
            policy = %log.policy_name,
            scanned = log.scanned,
            archived = log.archived,
            deleted = log.deleted,
            skipped = log.skipped,
            dry_run = log.dry_run,
            duration_ms = log.duration_ms,
            "sweep complete"
        );
        Ok(log)
    }

    /// Snapshot ids, then fetch/evaluate/transition one artifact at a time.
    ///
    /// No long transaction: a store failure stops the sweep and lands on
    /// the log row, and transitions already applied stay applied.
    fn evaluate(&self, store: &dyn IArtifactStore, policy: &GcPolicy) -> GcSweepLog {
        let mut log = GcSweepLog::begin(policy);
        let ids = match store.ids_by_state(&[ArtifactState::Active, ArtifactState::Archived]) {
            Ok(ids) => ids,
            Err(e) => {
                log.error = Some(e.to_string());
                return log;
            }
        };
        debug!(candidates = ids.len(), policy = %policy.name, "sweep snapshot taken");

        let now = Utc::now();
        for id in ids {
            let mut artifact = match store.get(&id) {
                Ok(Some(artifact)) => artifact,
                // Raced a hard delete between snapshot and fetch.
                Ok(None) => continue,
                Err(e) => {
                    log.error = Some(e.to_string());
                    break;
                }
            };
            log.scanned += 1;

            match self.judge(&artifact, policy, now) {
                Verdict::Keep => {}
                Verdict::Archive { reason } => {
                    if policy.dry_run {
                        log.archived += 1;
                        continue;
                    }
                    match self.transition(store, &mut artifact, ArtifactState::Archived, &reason, now)
                    {
                        Ok(()) => log.archived += 1,
                        Err(EngramError::Conflict { .. }) => log.skipped += 1,
                        Err(e) => {
                            log.error = Some(e.to_string());
                            break;
                        }
                    }
                }
                Verdict::Delete { reason } => {
                    if policy.dry_run {
                        if artifact.state == ArtifactState::Active {
                            log.archived += 1;
                        }
                        log.deleted += 1;
                        continue;
                    }
                    // Deletion always passes through Archived.
                    if artifact.state == ArtifactState::Active {
                        match self.transition(
                            store,
                            &mut artifact,
                            ArtifactState::Archived,
                            &reason,
                            now,
                        ) {
                            Ok(()) => log.archived += 1,
                            Err(EngramError::Conflict { .. }) => {
                                log.skipped += 1;
                                continue;
                            }
                            Err(e) => {
                                log.error = Some(e.to_string());
                                break;
                            }
                        }
                    }
                    match self.transition(store, &mut artifact, ArtifactState::Deleted, &reason, now)
                    {
                        Ok(()) => log.deleted += 1,
                        Err(EngramError::Conflict { .. }) => log.skipped += 1,
                        Err(e) => {
                            log.error = Some(e.to_string());
                            break;
                        }
                    }
                }
            }
        }
        log
    }

    /// Policy decision for one artifact. Both thresholds compare against
    /// decayed trust; stored trust is never consulted directly.
    fn judge(&self, artifact: &Artifact, policy: &GcPolicy, now: DateTime<Utc>) -> Verdict {
        let breakdown = self.decay.breakdown(artifact, now);
        let decayed = breakdown.decayed_trust;
        match artifact.state {
            ArtifactState::Active => {
                if decayed < policy.delete_threshold {
                    Verdict::Delete {
                        reason: format!(
                            "decayed trust {decayed:.3} below delete threshold {:.3}",
                            policy.delete_threshold
                        ),
                    }
                } else if decayed < policy.min_trust_threshold {
                    Verdict::Archive {
                        reason: format!(
                            "decayed trust {decayed:.3} below archive threshold {:.3}",
                            policy.min_trust_threshold
                        ),
                    }
                } else if breakdown.elapsed_hours > policy.max_age_hours {
                    Verdict::Archive {
                        reason: format!(
                            "age {:.1}h over max age {:.1}h",
                            breakdown.elapsed_hours, policy.max_age_hours
                        ),
                    }
                } else if artifact.is_expired(now) {
                    let stamp = artifact
                        .expires_at
                        .map(|e| e.to_rfc3339())
                        .unwrap_or_default();
                    Verdict::Archive {
                        reason: format!("expired at {stamp}"),
                    }
                } else {
                    Verdict::Keep
                }
            }
            ArtifactState::Archived => {
                if decayed < policy.delete_threshold {
                    Verdict::Delete {
                        reason: format!(
                            "decayed trust {decayed:.3} below delete threshold {:.3}",
                            policy.delete_threshold
                        ),
                    }
                } else {
                    Verdict::Keep
                }
            }
            // Snapshot raced a deletion; nothing left to collect.
            ArtifactState::Deleted => Verdict::Keep,
        }
    }

    /// One forward transition through the versioned update primitive,
    /// leaving a `decay_inspection` event. Trust is unchanged.
    fn transition(
        &self,
        store: &dyn IArtifactStore,
        artifact: &mut Artifact,
        next: ArtifactState,
        reason: &str,
        now: DateTime<Utc>,
    ) -> EngramResult<()> {
        let from = artifact.state;
        artifact.state = next;
        artifact.updated_at = now;
        let trust = artifact.trust.value();
        let event = TrustEvent::new(
            &artifact.id,
            TrustEventKind::DecayInspection,
            trust,
            trust,
            SignalDeltas::default(),
            "collector",
            reason,
        );
        artifact.version = store.update(artifact, artifact.version, Some(&event))?;
        debug!(
            artifact_id = %artifact.id,
            from = from.as_str(),
            to = next.as_str(),
            reason,
            "collector transition"
        );
        Ok(())
    }
}

impl Default for GcEngine {
    fn default() -> Self {
        Self::new()
    }
}
