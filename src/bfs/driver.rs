//! The level loop.
//!
//! `Idle -> LevelActive(0, {start}) -> Merging -> LevelActive(1, next) -> ... -> Done`.
//! The only termination condition is an empty merged frontier; a disconnected
//! component simply runs out of new vertices at its boundary.

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, trace, warn};

use crate::{
    bfs::{
        scheduler::{LevelOutcome, Scheduler},
        BfsConfig, DistanceTable, Frontier,
    },
    concurrency::CancelToken,
    error::Result,
    graph::{access::VisitedSet, Graph},
};

/// How a traversal ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraversalStatus {
    /// The reachable component was fully explored.
    Completed,
    /// The cancel token fired; distances of the interrupted level may be partial.
    Cancelled,
    /// The start vertex was out of range; nothing was traversed.
    InvalidStart,
}

/// Work done for one expanded level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelStats {
    /// Level whose frontier was expanded.
    pub level: u32,
    /// Size of that frontier.
    pub frontier: usize,
    /// Tasks it was split into.
    pub tasks: usize,
}

/// Result of [`parallel_bfs`].
#[derive(Debug)]
pub struct BfsOutcome {
    /// Discovered level per vertex.
    pub distances: DistanceTable,
    /// Deepest level that produced a non-empty frontier.
    pub depth: u32,
    /// How the traversal ended.
    pub status: TraversalStatus,
    /// One entry per expanded level, in level order.
    pub stats: Vec<LevelStats>,
}

impl BfsOutcome {
    /// Returns `true` if the traversal ran to completion.
    pub fn is_complete(&self) -> bool {
        self.status == TraversalStatus::Completed
    }
}

/// Runs a level-synchronous parallel BFS from `start`.
///
/// # Errors
/// Returns [`BfsError::PoolBuild`](crate::BfsError::PoolBuild) if a level needs
/// worker threads and they cannot be started.
pub fn parallel_bfs(graph: &Graph, start: usize, config: &BfsConfig) -> Result<BfsOutcome> {
    parallel_bfs_with_cancel(graph, start, config, &CancelToken::new())
}

/// Like [`parallel_bfs`], but stops early once `cancel` fires.
///
/// Cancellation is observed before each level and while waiting for a level's
/// tasks. A cancelled run is not an error: it returns the partial table with
/// [`TraversalStatus::Cancelled`].
///
/// # Errors
/// Returns [`BfsError::PoolBuild`](crate::BfsError::PoolBuild) if a level needs
/// worker threads and they cannot be started.
pub fn parallel_bfs_with_cancel(
    graph: &Graph,
    start: usize,
    config: &BfsConfig,
    cancel: &CancelToken,
) -> Result<BfsOutcome> {
    let vertices = graph.vertex_count();
    let distances = DistanceTable::new(vertices);

    if !graph.contains(start) {
        debug!(start, vertices, "start vertex out of range; nothing to traverse");
        return Ok(BfsOutcome {
            distances,
            depth: 0,
            status: TraversalStatus::InvalidStart,
            stats: Vec::new(),
        });
    }

    let _span = debug_span!("parallel_bfs", vertices, start).entered();

    let visited = VisitedSet::new(vertices);
    visited.claim(start);
    distances.record(start, 0);

    let mut scheduler = Scheduler::new(
        graph,
        &visited,
        &distances,
        config.effective_grain(),
        config.effective_workers(),
        config.cancel_poll,
    );

    let mut frontier = Frontier::seed(start);
    let mut level = 0u32;
    let mut stats = Vec::new();

    let status = loop {
        if cancel.is_cancelled() {
            break TraversalStatus::Cancelled;
        }

        let (outcome, plan) = scheduler.expand(&frontier, level, cancel)?;
        stats.push(LevelStats {
            level,
            frontier: frontier.len(),
            tasks: plan.tasks,
        });

        match outcome {
            LevelOutcome::Cancelled => break TraversalStatus::Cancelled,
            LevelOutcome::Expanded(next) => {
                trace!(level, discovered = next.len(), "level merged");
                if next.is_empty() {
                    break TraversalStatus::Completed;
                }
                frontier = next;
                level += 1;
            }
        }
    };

    // Shuts the worker pool down before the shared state goes away.
    drop(scheduler);

    match status {
        TraversalStatus::Cancelled => {
            warn!(level, reached = visited.visited_count(), "traversal cancelled");
        }
        _ => debug!(depth = level, reached = visited.visited_count(), "traversal complete"),
    }

    Ok(BfsOutcome {
        distances,
        depth: level,
        status,
        stats,
    })
}
