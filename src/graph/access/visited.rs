//! Visited sets for graph traversals.
//!
//! Word-packed atomics ([`AtomicBitset`]) sized to the graph's vertex count.
//! The visited logic of every traversal goes through [`VisitedSet::claim`].

use crate::concurrency::atomic::AtomicBitset;

/// A dense, word-packed visited set for one traversal.
pub struct VisitedSet {
    bits: AtomicBitset,
}

impl VisitedSet {
    /// Creates a visited set for vertices `0..vertices`, none visited.
    #[inline]
    pub fn new(vertices: usize) -> Self {
        Self {
            bits: AtomicBitset::new(vertices),
        }
    }

    /// Number of vertices covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len_bits()
    }

    /// Returns `true` if the set covers no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Marks `vertex` visited. Returns `true` iff this call is the one that
    /// transitioned it, i.e. the caller now owns the vertex for this traversal.
    #[inline(always)]
    pub fn claim(&self, vertex: usize) -> bool {
        self.bits.claim(vertex)
    }

    /// Returns `true` if `vertex` has been claimed.
    #[inline]
    pub fn is_visited(&self, vertex: usize) -> bool {
        self.bits.is_set(vertex)
    }

    /// Number of claimed vertices.
    pub fn visited_count(&self) -> usize {
        self.bits.count_ones()
    }
}
