//! Graph layout and per-traversal access state.
//!
//! - `adjacency`: the undirected adjacency-list graph traversals read from
//! - `access`: visited sets shared by the workers of one traversal

pub mod access;
pub mod adjacency;

pub use adjacency::Graph;
