//! Eviction Sweeper
//!
//! A single background task shared by every registered cache. On each tick it
//! snapshots the registry and sweeps TTL-expired entries out of each cache.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::cache::CacheRegistry;

/// What the sweeper is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweeperState {
    /// Waiting for the next tick
    Idle,
    /// Iterating the registered caches
    Sweeping,
}

/// Outcome of one sweep cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Caches visited
    pub caches: usize,
    /// Entries removed across all caches
    pub removed: usize,
    /// Caches whose sweep panicked
    pub failures: usize,
}

/// Runs one sweep cycle over a snapshot of `registry`.
///
/// A panic while sweeping one cache is logged and counted; the remaining
/// caches are still swept.
pub fn sweep_all(registry: &CacheRegistry, now: Instant) -> SweepReport {
    let mut report = SweepReport::default();

    for cache in registry.snapshot() {
        report.caches += 1;
        match catch_unwind(AssertUnwindSafe(|| cache.sweep(now))) {
            Ok(removed) => {
                if removed > 0 {
                    debug!(cache = cache.name(), removed, "Swept expired entries");
                }
                report.removed += removed;
            }
            Err(panic) => {
                report.failures += 1;
                error!(
                    cache = cache.name(),
                    "Sweep failed: {}",
                    panic_message(panic.as_ref())
                );
            }
        }
    }

    report
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic"
    }
}

/// Periodic TTL sweeper over every cache in a registry.
#[derive(Debug)]
pub struct EvictionSweeper {
    registry: CacheRegistry,
    interval: Duration,
}

impl EvictionSweeper {
    /// Creates a sweeper that wakes every `interval`.
    pub fn new(registry: CacheRegistry, interval: Duration) -> Self {
        Self { registry, interval }
    }

    /// Spawns the sweep loop on the tokio runtime.
    ///
    /// The loop runs until [`SweeperHandle::shutdown`] is called or the
    /// handle is dropped. A cycle in progress always completes; stopping
    /// between cycles is safe since sweeping is idempotent.
    pub fn spawn(self) -> SweeperHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let (state_tx, state_rx) = watch::channel(SweeperState::Idle);
        let Self { registry, interval } = self;

        let task = tokio::spawn(async move {
            info!(
                "Starting eviction sweeper with interval of {} ms",
                interval.as_millis()
            );

            loop {
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    // A send or a dropped sender both mean stop
                    _ = shutdown_rx.changed() => break,
                }

                state_tx.send_replace(SweeperState::Sweeping);
                let report = sweep_all(&registry, Instant::now());
                state_tx.send_replace(SweeperState::Idle);

                if report.removed > 0 || report.failures > 0 {
                    info!(
                        caches = report.caches,
                        removed = report.removed,
                        failures = report.failures,
                        "Sweep cycle complete"
                    );
                } else {
                    debug!(caches = report.caches, "Sweep cycle: no expired entries");
                }

                tokio::task::yield_now().await;
            }

            info!("Eviction sweeper stopped");
        });

        SweeperHandle {
            shutdown: shutdown_tx,
            state: state_rx,
            task,
        }
    }
}

/// Owner-side handle of a running sweeper.
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown: watch::Sender<bool>,
    state: watch::Receiver<SweeperState>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Current state of the sweep loop.
    pub fn state(&self) -> SweeperState {
        *self.state.borrow()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Signals the loop to stop and waits for it to exit.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            warn!("Eviction sweeper ended abnormally: {}", e);
        }
    }
}
