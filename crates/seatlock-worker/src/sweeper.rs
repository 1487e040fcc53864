//! Expiry sweeper — periodic reclamation of lapsed holds.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time;
use tracing;

use seatlock_locks::LockManager;

/// Recurring task that reclaims expired holds.
///
/// Invokes the same [`LockManager::expire_sweep`] entry point an
/// external caller would; a seat that was confirmed or released while
/// the sweep ran simply loses the compare-and-transition race, which is
/// success, not error. The sweeper runs independently of the request
/// path and never blocks it.
#[derive(Debug)]
pub struct ExpirySweeper {
    /// The lock manager to sweep through.
    locks: Arc<LockManager>,
    /// Time between sweeps.
    interval: Duration,
}

impl ExpirySweeper {
    /// Create a sweeper running every `interval`.
    pub fn new(locks: Arc<LockManager>, interval: Duration) -> Self {
        Self { locks, interval }
    }

    /// Run the sweep loop until the cancel signal flips to `true`.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        tracing::info!(
            interval_seconds = self.interval.as_secs_f64(),
            "Expiry sweeper started"
        );

        let mut interval = time::interval(self.interval);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        tracing::info!("Expiry sweeper received shutdown signal");
                        break;
                    }
                }
                _ = interval.tick() => {
                    let reclaimed = self.locks.expire_sweep(Utc::now());
                    if !reclaimed.is_empty() {
                        tracing::debug!(count = reclaimed.len(), "Sweep reclaimed expired holds");
                    }
                }
            }
        }

        tracing::info!("Expiry sweeper shut down");
    }

    /// Spawn the sweep loop as a Tokio task.
    pub fn spawn(self, cancel: watch::Receiver<bool>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move { self.run(cancel).await })
    }
}
