//! Per-traversal access state.
//!
//! Traversals own their visited set; the graph itself carries no traversal
//! state, which keeps it freely shareable across concurrent traversals.

pub mod visited;

pub use visited::VisitedSet;
