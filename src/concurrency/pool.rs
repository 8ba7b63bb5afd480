//! Fixed-size worker pool reused across BFS levels.

use tracing::{debug, error};

use crate::error::{BfsError, Result};

/// A fixed-size pool of `bfs-worker-{i}` threads.
///
/// Threads are started once and serve every level of a traversal. Dropping the
/// pool shuts the threads down; work that was queued but never started is not
/// awaited by the drop.
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl WorkerPool {
    /// Starts a pool with `workers` threads (at least one).
    ///
    /// # Errors
    /// Returns [`BfsError::PoolBuild`] if the threads cannot be spawned.
    pub fn build(workers: usize) -> Result<Self> {
        let workers = workers.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("bfs-worker-{i}"))
            .build()
            .map_err(|source| {
                error!(workers, %source, "worker pool creation failed");
                BfsError::PoolBuild { workers, source }
            })?;
        debug!(workers, "worker pool started");
        Ok(Self { pool, workers })
    }

    /// Number of worker threads.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs `op` on the calling thread with a scope whose spawned tasks execute on
    /// the pool. Returns once `op` and every task spawned in the scope finished.
    ///
    /// A panic in a spawned task is resumed here after the scope drains.
    pub fn scope<'scope, OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce(&rayon::Scope<'scope>) -> R,
    {
        self.pool.in_place_scope(op)
    }
}

impl core::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.workers)
            .finish()
    }
}
