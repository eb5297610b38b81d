//! Periodic collector sweeps on the tokio runtime.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use engram_core::errors::EngramError;

use crate::bank::MemoryBank;

/// Runs collector sweeps every `gc.sweep_interval_secs` seconds until
/// shut down.
///
/// Sweeps run on the blocking pool so a long sweep never stalls the
/// runtime. A tick that lands while the previous sweep is still running
/// is skipped: the collector's single-flight guard reports it as
/// `SweepInProgress` and the scheduler waits for the next tick.
pub struct GcScheduler {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl GcScheduler {
    /// Spawn the sweep loop over a shared bank. Must be called from
    /// within a tokio runtime.
    pub fn start(bank: Arc<MemoryBank>) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run(bank, shutdown_rx));
        Self {
            shutdown_tx,
            handle,
        }
    }

    /// Signal shutdown and wait for the loop to exit. A sweep already
    /// running on the blocking pool finishes on its own.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.handle.await;
    }
}

async fn run(bank: Arc<MemoryBank>, mut shutdown_rx: watch::Receiver<bool>) {
    let interval_secs = bank.config().gc.sweep_interval_secs.max(1);
    let mut ticker = interval(Duration::from_secs(interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick fires immediately; consume it so starting the
    // scheduler does not sweep at once.
    ticker.tick().await;

    info!(
        interval_secs,
        policy = %bank.config().gc.policy.name,
        "collector scheduler started"
    );

    loop {
        tokio::select! {
            changed = shutdown_rx.changed() => {
                // A dropped sender counts as shutdown too.
                if changed.is_err() || *shutdown_rx.borrow() {
                    info!("collector scheduler shutting down");
                    break;
                }
            }
            _ = ticker.tick() => {
                sweep_once(&bank).await;
            }
        }
    }
}

async fn sweep_once(bank: &Arc<MemoryBank>) {
    let bank = Arc::clone(bank);
    let joined = tokio::task::spawn_blocking(move || {
        let policy = bank.config().gc.policy.clone();
        bank.garbage_collect(&policy)
    })
    .await;

    match joined {
        Ok(Ok(log)) => debug!(
            sweep_id = %log.id,
            scanned = log.scanned,
            archived = log.archived,
            deleted = log.deleted,
            "scheduled sweep finished"
        ),
        Ok(Err(EngramError::SweepInProgress)) => {
            warn!("previous sweep still running, tick skipped");
        }
        Ok(Err(e)) => warn!(error = %e, "scheduled sweep failed"),
        Err(e) => warn!(error = %e, "sweep task panicked"),
    }
}
