//! Per-vertex BFS levels.

use core::sync::atomic::Ordering;

use crate::sync::AtomicU32;

/// Sentinel for a vertex no traversal has reached.
pub const UNDISCOVERED: u32 = u32::MAX;

/// Maps each vertex to the level at which it was discovered.
///
/// A level is written once per vertex, by the worker that won the vertex's
/// claim. Stores are relaxed; a reader is guaranteed to see them only after
/// synchronizing with the level latch that closes the writing level (which the
/// driver always does before handing vertices to the next level or returning).
pub struct DistanceTable {
    levels: Box<[AtomicU32]>,
}

impl DistanceTable {
    /// Creates a table for `vertices` vertices, all undiscovered.
    pub fn new(vertices: usize) -> Self {
        let levels = (0..vertices).map(|_| AtomicU32::new(UNDISCOVERED)).collect();
        Self { levels }
    }

    /// Records `level` for `vertex`. Out-of-range vertices are ignored.
    #[inline]
    pub fn record(&self, vertex: usize, level: u32) {
        debug_assert!(level != UNDISCOVERED, "level {level} collides with the sentinel");
        if let Some(slot) = self.levels.get(vertex) {
            slot.store(level, Ordering::Relaxed);
        }
    }

    /// Level of `vertex`, or `None` if undiscovered or out of range.
    #[inline]
    pub fn get(&self, vertex: usize) -> Option<u32> {
        self.levels
            .get(vertex)
            .map(|slot| slot.load(Ordering::Relaxed))
            .filter(|&level| level != UNDISCOVERED)
    }

    /// Number of vertices covered.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Returns `true` if the table covers no vertices.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of discovered vertices.
    pub fn reached(&self) -> usize {
        self.iter().flatten().count()
    }

    /// Largest discovered level.
    pub fn max_level(&self) -> Option<u32> {
        self.iter().flatten().max()
    }

    /// Levels in vertex order.
    pub fn iter(&self) -> impl Iterator<Item = Option<u32>> + '_ {
        (0..self.levels.len()).map(move |v| self.get(v))
    }

    /// Copies the levels out in vertex order.
    pub fn to_vec(&self) -> Vec<Option<u32>> {
        self.iter().collect()
    }
}

impl PartialEq for DistanceTable {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for DistanceTable {}

impl core::fmt::Debug for DistanceTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::*;

    #[test]
    fn starts_undiscovered() {
        let d = DistanceTable::new(3);
        assert_eq!(d.to_vec(), vec![None, None, None]);
        assert_eq!(d.reached(), 0);
        assert_eq!(d.max_level(), None);
    }

    #[test]
    fn records_and_reads_levels() {
        let d = DistanceTable::new(4);
        d.record(0, 0);
        d.record(3, 2);
        d.record(9, 1);
        assert_eq!(d.get(0), Some(0));
        assert_eq!(d.get(1), None);
        assert_eq!(d.get(3), Some(2));
        assert_eq!(d.get(9), None);
        assert_eq!(d.reached(), 2);
        assert_eq!(d.max_level(), Some(2));
    }

    #[test]
    fn equality_compares_levels() {
        let a = DistanceTable::new(2);
        let b = DistanceTable::new(2);
        a.record(1, 5);
        assert_ne!(a, b);
        b.record(1, 5);
        assert_eq!(a, b);
        assert_ne!(a, DistanceTable::new(3));
    }
}
