//! Concurrency building blocks for the level-synchronous traversal.
//!
//! Important: none of these types lock the graph. The graph is shared read-only;
//! the only shared mutable state is the visited bitset and the distance table,
//! both mutated through atomics. The latch is the single blocking point.

pub mod atomic;
pub mod cancel;
pub mod latch;
pub mod pool;

pub use cancel::CancelToken;
pub use latch::{CountLatch, LatchGuard, LatchWait};
pub use pool::WorkerPool;
