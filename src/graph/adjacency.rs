//! An undirected adjacency-list graph.
//!
//! Each vertex owns a `Vec<usize>` of neighbours. Inserting the undirected edge
//! `u - v` appends `v` to `u`'s list and `u` to `v`'s list, so every edge is
//! mirrored. Traversals only ever take `&Graph`, so a graph is read-only for
//! the lifetime of any traversal over it.
//!
//! ### Performance Characteristics
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `add_edge` | \(O(1)\) amortized | Appends to both lists; duplicates are kept |
//! | `neighbors` | \(O(1)\) | Borrowing iterator over the list |
//! | `degree` | \(O(1)\) | `Vec::len` |
//! | `bfs` | \(O(n + m)\) | Sequential reference traversal |

use std::collections::VecDeque;

use crate::bfs::DistanceTable;

/// An undirected graph over the vertices `0..vertex_count`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<usize>>,
    edges: usize,
}

impl Graph {
    /// Creates a graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
            edges: 0,
        }
    }

    /// Builds a graph from an edge list. Out-of-range edges are skipped.
    pub fn from_edges<I>(vertex_count: usize, edges: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self::new(vertex_count);
        for (u, v) in edges {
            graph.add_edge(u, v);
        }
        graph
    }

    /// Inserts the undirected edge `u - v`.
    ///
    /// Silently does nothing when either endpoint is outside `0..vertex_count`;
    /// the graph is left untouched in that case. Self-loops and parallel edges
    /// are stored as given.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        if !self.contains(u) || !self.contains(v) {
            return;
        }
        self.adjacency[u].push(v);
        self.adjacency[v].push(u);
        self.edges += 1;
    }

    /// Returns the neighbours of `u` in insertion order.
    ///
    /// The iterator is cheap to clone, so it can be restarted. Out-of-range
    /// vertices have no neighbours.
    #[inline]
    pub fn neighbors(&self, u: usize) -> impl Iterator<Item = usize> + Clone + '_ {
        self.adjacency
            .get(u)
            .map_or(&[][..], Vec::as_slice)
            .iter()
            .copied()
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of accepted `add_edge` calls.
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Length of `u`'s neighbour list (0 when out of range).
    pub fn degree(&self, u: usize) -> usize {
        self.adjacency.get(u).map_or(0, Vec::len)
    }

    /// Returns `true` if `v` is a vertex of this graph.
    #[inline]
    pub fn contains(&self, v: usize) -> bool {
        v < self.adjacency.len()
    }

    /// Sequential queue-based BFS from `start`.
    ///
    /// This is the single-threaded reference the parallel traversal is checked
    /// against. An out-of-range `start` yields a table with nothing discovered.
    pub fn bfs(&self, start: usize) -> DistanceTable {
        let distances = DistanceTable::new(self.vertex_count());
        if !self.contains(start) {
            return distances;
        }

        let mut visited = vec![false; self.vertex_count()];
        let mut queue = VecDeque::new();
        visited[start] = true;
        distances.record(start, 0);
        queue.push_back((start, 0u32));

        while let Some((u, level)) = queue.pop_front() {
            for v in self.neighbors(u) {
                if !visited[v] {
                    visited[v] = true;
                    distances.record(v, level + 1);
                    queue.push_back((v, level + 1));
                }
            }
        }

        distances
    }
}
