//! # `wavefront` - Level-Synchronous Parallel BFS
//!
//! Breadth-first search over undirected graphs where a fixed worker pool expands
//! each frontier in parallel and a counting latch separates one level from the next.
//!
//! ## Correctness Guarantees
//!
//! ### Exactly-once claiming
//! - **Word-packed visited bits**: every vertex owns one bit in an array of atomic
//!   words. A claim reads the word, fails fast if the bit is set, and otherwise
//!   compare-and-swaps the bit in, re-checking after every failed CAS.
//! - **Single writer per distance**: only the claim winner records a distance, so a
//!   vertex's level is written exactly once.
//!
//! ### Publication
//! - **Level latch**: each task stores its bucket and then counts down a
//!   mutex/condvar latch. The driver waits on that latch before merging buckets, so
//!   every distance write of level `L` happens-before any read of level `L + 1`.
//! - **No lost vertices**: a vertex enters exactly one bucket (its claim winner's),
//!   and every bucket is merged into the next frontier.
//!
//! ### Cancellation
//! - Cooperative only. The driver checks a [`CancelToken`] between levels and
//!   while it waits on the latch. A cancelled run returns the partial distance
//!   table with [`TraversalStatus::Cancelled`] rather than an error.
//!
//! ## Architecture
//!
//! 1. **Graph** ([`Graph`]): adjacency lists, read-only during traversal.
//! 2. **Visited set** ([`graph::access::VisitedSet`]): atomic bitset with `claim`.
//! 3. **Distance table** ([`DistanceTable`]): per-vertex level, written once.
//! 4. **Frontier** ([`Frontier`]): vertices discovered at the current level.
//! 5. **Scheduler** ([`bfs::scheduler`]): fan-out policy, chunk dispatch, barrier.
//! 6. **Driver** ([`parallel_bfs`]): the level loop.
//!
//! ## Example
//!
//! ```rust
//! use wavefront::{parallel_bfs, BfsConfig, Graph};
//!
//! let mut graph = Graph::new(5);
//! for v in 0..4 {
//!     graph.add_edge(v, v + 1);
//! }
//!
//! let outcome = parallel_bfs(&graph, 0, &BfsConfig::default()).unwrap();
//! assert!(outcome.is_complete());
//! assert_eq!(
//!     outcome.distances.to_vec(),
//!     vec![Some(0), Some(1), Some(2), Some(3), Some(4)]
//! );
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod bfs;
pub mod concurrency;
pub mod error;
pub mod graph;

pub(crate) mod sync;

pub use bfs::{
    parallel_bfs, parallel_bfs_with_cancel, BfsConfig, BfsOutcome, DistanceTable, Frontier,
    LevelStats, TraversalStatus,
};
pub use concurrency::{CancelToken, CountLatch, WorkerPool};
pub use error::{BfsError, Result};
pub use graph::Graph;

// Compile-time layout checks for the hot traversal state.
const _: () = {
    use core::mem;

    // One visited word per `usize`; claims index words with shifts.
    assert!(usize::BITS == 32 || usize::BITS == 64);

    // Distances are packed into 32 bits with `u32::MAX` as the sentinel.
    assert!(mem::size_of::<core::sync::atomic::AtomicU32>() == 4);
};
