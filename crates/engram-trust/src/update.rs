//! Outcome-driven trust updates.
//!
//! Consumers report how a stored artifact worked out; the engine turns each
//! report into a bounded trust movement with diminishing returns, recomputes
//! the usage signal, and appends exactly one TrustEvent atomically with the
//! artifact mutation. Failed CAS attempts leave no events behind.

use chrono::Utc;
use tracing::{debug, instrument, warn};

use engram_core::artifact::ArtifactState;
use engram_core::config::{SignalWeights, TrustUpdateConfig};
use engram_core::errors::{EngramError, EngramResult};
use engram_core::models::{Outcome, SignalDeltas, TrustEvent, TrustEventKind};
use engram_core::traits::IArtifactStore;
use engram_core::{Artifact, TrustScore};

/// Applies consumer outcome reports and operator corrections to stored
/// artifacts.
///
/// Provenance, consensus and governance are fixed at creation; only the
/// usage signal evolves here. The cached trust score accumulates the
/// outcome adjustments plus the usage signal's weighted shift, so replaying
/// an artifact's TrustEvents reproduces it.
pub struct TrustUpdateEngine<'a> {
    store: &'a dyn IArtifactStore,
    config: TrustUpdateConfig,
    weights: SignalWeights,
}

impl<'a> TrustUpdateEngine<'a> {
    pub fn new(
        store: &'a dyn IArtifactStore,
        config: TrustUpdateConfig,
        weights: SignalWeights,
    ) -> Self {
        Self {
            store,
            config,
            weights,
        }
    }

    /// Report an outcome for `artifact_id` and return the new trust.
    ///
    /// Each report counts as one consumption: the access counter and
    /// last-accessed stamp move first, then the outcome lands with
    /// diminishing returns:
    ///
    /// ```text
    /// success: +0.05 / (1 + success_count * 0.1)
    /// failure: -0.08 / (1 + failure_count * 0.05)
    /// bonus:   +0.02 when access_count > 5 and success rate > 0.8
    /// ```
    ///
    /// On version conflict the engine refetches and recomputes from the
    /// latest state, up to the configured attempt budget, then surfaces
    /// `Conflict`. `NotFound` is a best-effort miss: the artifact was
    /// deleted between the caller's read and this report.
    #[instrument(skip(self, reason), fields(outcome = ?outcome))]
    pub fn apply_outcome(
        &self,
        artifact_id: &str,
        outcome: Outcome,
        reason: Option<&str>,
        actor: Option<&str>,
    ) -> EngramResult<TrustScore> {
        let mut conflict_version = 0;
        for attempt in 0..self.config.max_attempts {
            let mut artifact = self.fetch_live(artifact_id)?;
            let expected_version = artifact.version;
            let now = Utc::now();

            artifact.access_count += 1;
            artifact.last_accessed_at = Some(now);

            let old_trust = artifact.trust.value();
            let old_usage = artifact.signals.usage;

            let adjustment = match outcome {
                Outcome::Success => {
                    let boost = self.config.success_boost
                        / (1.0 + artifact.success_count as f64 * self.config.success_damping);
                    artifact.success_count += 1;
                    boost
                }
                Outcome::Failure => {
                    let penalty = self.config.failure_penalty
                        / (1.0 + artifact.failure_count as f64 * self.config.failure_damping);
                    artifact.failure_count += 1;
                    -penalty
                }
            };

            let bonus = if artifact.access_count > self.config.consistency_min_access
                && artifact.success_rate() > self.config.consistency_min_rate
            {
                self.config.consistency_bonus
            } else {
                0.0
            };

            let new_usage = self.usage_signal(&artifact);
            let usage_delta = new_usage - old_usage;
            artifact.signals.usage = new_usage;

            let new_trust =
                TrustScore::new(old_trust + adjustment + bonus + self.weights.usage * usage_delta);
            artifact.trust = new_trust;
            artifact.updated_at = now;

            let kind = match outcome {
                Outcome::Success => TrustEventKind::Success,
                Outcome::Failure => TrustEventKind::Failure,
            };
            let event = TrustEvent::new(
                artifact_id,
                kind,
                old_trust,
                new_trust.value(),
                SignalDeltas {
                    usage: usage_delta,
                    ..SignalDeltas::default()
                },
                actor.unwrap_or("system"),
                reason.unwrap_or(match outcome {
                    Outcome::Success => "consumer reported success",
                    Outcome::Failure => "consumer reported failure",
                }),
            );

            match self.store.update(&artifact, expected_version, Some(&event)) {
                Ok(_) => {
                    debug!(
                        artifact_id,
                        old_trust,
                        new_trust = %new_trust,
                        attempt,
                        "outcome applied"
                    );
                    return Ok(new_trust);
                }
                Err(EngramError::Conflict { .. }) => {
                    debug!(artifact_id, attempt, "version conflict, refetching");
                    conflict_version = expected_version;
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            artifact_id,
            attempts = self.config.max_attempts,
            "outcome report lost the version race on every attempt"
        );
        Err(EngramError::Conflict {
            id: artifact_id.to_string(),
            expected_version: conflict_version,
        })
    }

    /// Operator correction: apply an explicit delta, bypassing the outcome
    /// formulas. Counters and signals are untouched; the result is still
    /// clamped and still audited, and the actor is required.
    #[instrument(skip(self, reason))]
    pub fn adjust(
        &self,
        artifact_id: &str,
        delta: f64,
        reason: &str,
        actor: &str,
    ) -> EngramResult<TrustScore> {
        if actor.trim().is_empty() {
            return Err(EngramError::Validation(
                "manual trust adjustment requires an actor".to_string(),
            ));
        }
        if !delta.is_finite() {
            return Err(EngramError::Validation(format!(
                "manual trust delta must be finite, got {delta}"
            )));
        }

        let mut conflict_version = 0;
        for attempt in 0..self.config.max_attempts {
            let mut artifact = self.fetch_live(artifact_id)?;
            let expected_version = artifact.version;

            let old_trust = artifact.trust.value();
            let new_trust = TrustScore::new(old_trust + delta);
            artifact.trust = new_trust;
            artifact.updated_at = Utc::now();

            let event = TrustEvent::new(
                artifact_id,
                TrustEventKind::Manual,
                old_trust,
                new_trust.value(),
                SignalDeltas::default(),
                actor,
                reason,
            );

            match self.store.update(&artifact, expected_version, Some(&event)) {
                Ok(_) => {
                    debug!(artifact_id, delta, new_trust = %new_trust, "manual adjustment applied");
                    return Ok(new_trust);
                }
                Err(EngramError::Conflict { .. }) => {
                    debug!(artifact_id, attempt, "version conflict, refetching");
                    conflict_version = expected_version;
                }
                Err(e) => return Err(e),
            }
        }

        Err(EngramError::Conflict {
            id: artifact_id.to_string(),
            expected_version: conflict_version,
        })
    }

    /// Fetch an artifact that can still be mutated. Deleted tombstones are
    /// reported as `NotFound` without touching the store's write path.
    fn fetch_live(&self, artifact_id: &str) -> EngramResult<Artifact> {
        let artifact = self
            .store
            .get(artifact_id)?
            .ok_or_else(|| EngramError::NotFound {
                id: artifact_id.to_string(),
            })?;
        if artifact.state == ArtifactState::Deleted {
            return Err(EngramError::NotFound {
                id: artifact_id.to_string(),
            });
        }
        Ok(artifact)
    }

    /// `usage = success_rate*0.7 + min(1, access_count/20)*0.3` under the
    /// configured weights and saturation point.
    fn usage_signal(&self, artifact: &Artifact) -> f64 {
        let rate = artifact.success_rate();
        let volume = (artifact.access_count as f64 / self.config.usage_saturation).min(1.0);
        (rate * self.config.usage_rate_weight + volume * self.config.usage_volume_weight)
            .clamp(0.0, 1.0)
    }
}
