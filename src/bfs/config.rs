//! Traversal tunables.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Hard upper bound on worker threads.
pub const MAX_WORKERS_CAP: usize = 128;
/// Upper bound applied to the detected hardware concurrency for the default.
pub const DEFAULT_WORKER_CAP: usize = 32;
/// Default minimum frontier slice per task.
pub const DEFAULT_GRAIN: usize = 1024;
/// Smallest grain the traversal will use.
pub const MIN_GRAIN: usize = 256;
/// Default interval at which a blocked driver re-checks its cancel token.
pub const DEFAULT_CANCEL_POLL: Duration = Duration::from_millis(1);

/// Configuration for [`parallel_bfs`](crate::parallel_bfs).
///
/// Values are stored as given; [`effective_workers`](Self::effective_workers)
/// and [`effective_grain`](Self::effective_grain) apply the bounds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BfsConfig {
    /// Maximum number of parallel tasks per level (and pool threads).
    pub max_workers: usize,
    /// Minimum number of frontier vertices assigned to one task.
    pub grain_size: usize,
    /// How often a driver blocked on a level re-checks cancellation.
    pub cancel_poll: Duration,
}

impl Default for BfsConfig {
    fn default() -> Self {
        let hardware = std::thread::available_parallelism().map_or(1, usize::from);
        Self {
            max_workers: hardware.min(DEFAULT_WORKER_CAP),
            grain_size: DEFAULT_GRAIN,
            cancel_poll: DEFAULT_CANCEL_POLL,
        }
    }
}

impl BfsConfig {
    /// Sets the worker cap.
    #[must_use]
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    /// Sets the grain size.
    #[must_use]
    pub fn with_grain_size(mut self, grain_size: usize) -> Self {
        self.grain_size = grain_size;
        self
    }

    /// Sets the cancellation poll interval.
    #[must_use]
    pub fn with_cancel_poll(mut self, cancel_poll: Duration) -> Self {
        self.cancel_poll = cancel_poll;
        self
    }

    /// Worker count clamped to `1..=MAX_WORKERS_CAP`.
    pub fn effective_workers(&self) -> usize {
        self.max_workers.clamp(1, MAX_WORKERS_CAP)
    }

    /// Grain size raised to at least [`MIN_GRAIN`].
    pub fn effective_grain(&self) -> usize {
        self.grain_size.max(MIN_GRAIN)
    }
}
