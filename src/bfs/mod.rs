//! Level-synchronous parallel breadth-first search.
//!
//! The driver walks the levels `0, 1, 2, ...`. For every level the scheduler
//! splits the frontier into contiguous chunks, each worker expands its chunk into
//! a private bucket, a countdown latch closes the level, and the buckets are
//! concatenated into the next frontier. The traversal ends on the first empty
//! next frontier.

pub mod config;
pub mod distance;
pub mod driver;
pub mod frontier;
pub mod scheduler;

pub use config::BfsConfig;
pub use distance::DistanceTable;
pub use driver::{
    parallel_bfs, parallel_bfs_with_cancel, BfsOutcome, LevelStats, TraversalStatus,
};
pub use frontier::Frontier;
pub use scheduler::FanOut;
