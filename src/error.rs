//! Error types.
//!
//! Only one failure is fatal: the environment refusing to start worker threads.
//! Out-of-range vertices are ignored and cancellation is reported through
//! [`TraversalStatus`](crate::TraversalStatus), neither is an error.

use thiserror::Error;

/// Errors surfaced by the traversal.
#[derive(Debug, Error)]
pub enum BfsError {
    /// The worker pool could not be created.
    #[error("failed to build a worker pool with {workers} threads")]
    PoolBuild {
        /// Number of worker threads requested.
        workers: usize,
        /// Underlying thread-pool error.
        #[source]
        source: rayon::ThreadPoolBuildError,
    },
}

/// Result alias for traversal operations.
pub type Result<T> = core::result::Result<T, BfsError>;
