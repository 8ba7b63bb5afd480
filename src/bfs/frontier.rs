//! The set of vertices discovered at the current level.

use core::ops::Range;

/// Vertices discovered at one level and not yet expanded.
///
/// Order carries no meaning for correctness; it only fixes how the scheduler
/// partitions the frontier into chunks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frontier {
    vertices: Vec<usize>,
}

impl Frontier {
    /// The level-0 frontier: just `start`.
    pub fn seed(start: usize) -> Self {
        Self {
            vertices: vec![start],
        }
    }

    /// Concatenates per-task buckets, in bucket order, into the next frontier.
    pub fn from_buckets(buckets: Vec<Vec<usize>>) -> Self {
        let total = buckets.iter().map(Vec::len).sum();
        let mut vertices = Vec::with_capacity(total);
        for bucket in buckets {
            vertices.extend(bucket);
        }
        Self { vertices }
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` when no vertex was discovered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// All vertices.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.vertices
    }

    /// The vertices in `range`, clipped to the frontier. Empty when the range
    /// starts past the end.
    #[inline]
    pub fn chunk(&self, range: Range<usize>) -> &[usize] {
        let end = range.end.min(self.vertices.len());
        let start = range.start.min(end);
        &self.vertices[start..end]
    }
}

impl From<Vec<usize>> for Frontier {
    fn from(vertices: Vec<usize>) -> Self {
        Self { vertices }
    }
}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::*;

    #[test]
    fn seed_holds_start() {
        let f = Frontier::seed(7);
        assert_eq!(f.as_slice(), &[7]);
        assert_eq!(f.len(), 1);
        assert!(!f.is_empty());
    }

    #[test]
    fn buckets_concatenate_in_order() {
        let f = Frontier::from_buckets(vec![vec![3, 1], vec![], vec![2]]);
        assert_eq!(f.as_slice(), &[3, 1, 2]);
        assert!(Frontier::from_buckets(vec![vec![], vec![]]).is_empty());
    }

    #[test]
    fn chunk_clips_to_bounds() {
        let f = Frontier::from(vec![0, 1, 2, 3, 4]);
        assert_eq!(f.chunk(0..2), &[0, 1]);
        assert_eq!(f.chunk(4..6), &[4]);
        assert!(f.chunk(6..8).is_empty());
        assert!(f.chunk(5..5).is_empty());
    }
}
