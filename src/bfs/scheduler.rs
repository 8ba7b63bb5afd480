//! Level scheduler: fan-out policy, chunk dispatch and the level barrier.
//!
//! For a frontier of `F` vertices the scheduler runs
//! `T = clamp(ceil(F / grain), 1, max_workers)` tasks over contiguous chunks of
//! `ceil(F / T)` vertices. `T == 1` runs inline on the driver thread. Otherwise
//! every chunk is spawned onto the [`WorkerPool`]; each task writes its private
//! bucket into its own slot and then counts down the level's [`CountLatch`].
//! Chunks that come out empty are counted down at dispatch time, so the latch
//! always expects exactly `T` signals.

use core::ops::Range;
use core::sync::atomic::Ordering;
use std::time::Duration;

use crossbeam_utils::CachePadded;
use tracing::{debug, trace};

use crate::{
    bfs::{DistanceTable, Frontier},
    concurrency::{CancelToken, CountLatch, LatchGuard, LatchWait, WorkerPool},
    error::Result,
    graph::{access::VisitedSet, Graph},
    sync::{lock, AtomicBool, Mutex},
};

/// Upper bound on the initial capacity reserved for one task's bucket.
const MAX_BUCKET_RESERVE: usize = 1 << 20;

/// How a frontier is split into tasks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FanOut {
    /// Number of tasks for the level.
    pub tasks: usize,
    /// Vertices per task (the last non-empty chunk may be shorter).
    pub chunk: usize,
}

impl FanOut {
    /// Plans a level over `frontier_len` vertices.
    ///
    /// `grain` and `max_workers` are used as given (raised to 1); bounds such as
    /// the minimum grain are applied by [`BfsConfig`](crate::BfsConfig).
    pub fn plan(frontier_len: usize, grain: usize, max_workers: usize) -> Self {
        let tasks = frontier_len
            .div_ceil(grain.max(1))
            .clamp(1, max_workers.max(1));
        let chunk = frontier_len.div_ceil(tasks);
        Self { tasks, chunk }
    }

    /// The slice of the frontier assigned to `task`.
    ///
    /// Empty when `task * chunk` is already past the end, which happens when
    /// more tasks were planned than the frontier can fill.
    pub fn range(&self, task: usize, frontier_len: usize) -> Range<usize> {
        let from = task.saturating_mul(self.chunk).min(frontier_len);
        let to = from.saturating_add(self.chunk).min(frontier_len);
        from..to
    }

    /// Returns `true` when the level runs on the driver thread.
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.tasks == 1
    }
}

/// Result of expanding one level.
#[derive(Debug)]
pub(crate) enum LevelOutcome {
    /// Every task finished; the merged next frontier.
    Expanded(Frontier),
    /// The cancel token fired while waiting for the level to drain.
    Cancelled,
}

/// Expands frontiers level by level over shared traversal state.
///
/// The worker pool is started on the first level that needs more than one task
/// and reused for every later level; it shuts down when the scheduler is dropped.
pub(crate) struct Scheduler<'t> {
    graph: &'t Graph,
    visited: &'t VisitedSet,
    distances: &'t DistanceTable,
    grain: usize,
    max_workers: usize,
    cancel_poll: Duration,
    pool: Option<WorkerPool>,
}

impl<'t> Scheduler<'t> {
    pub(crate) fn new(
        graph: &'t Graph,
        visited: &'t VisitedSet,
        distances: &'t DistanceTable,
        grain: usize,
        max_workers: usize,
        cancel_poll: Duration,
    ) -> Self {
        Self {
            graph,
            visited,
            distances,
            grain,
            max_workers,
            cancel_poll,
            pool: None,
        }
    }

    /// Expands `frontier` (discovered at `level`) into the frontier of `level + 1`.
    ///
    /// # Errors
    /// Fails only if the worker pool has to be started and cannot be.
    pub(crate) fn expand(
        &mut self,
        frontier: &Frontier,
        level: u32,
        cancel: &CancelToken,
    ) -> Result<(LevelOutcome, FanOut)> {
        let plan = FanOut::plan(frontier.len(), self.grain, self.max_workers);
        let next_level = level + 1;
        let (graph, visited, distances) = (self.graph, self.visited, self.distances);

        if plan.is_inline() {
            let mut out = Vec::with_capacity(bucket_reserve(frontier.len()));
            expand_chunk(graph, visited, distances, frontier.as_slice(), next_level, &mut out);
            return Ok((LevelOutcome::Expanded(Frontier::from(out)), plan));
        }

        let pool = match self.pool.take() {
            Some(pool) => pool,
            None => WorkerPool::build(self.max_workers)?,
        };
        let pool = self.pool.insert(pool);

        debug!(
            level,
            frontier = frontier.len(),
            tasks = plan.tasks,
            chunk = plan.chunk,
            "dispatching level"
        );

        let slots: Vec<CachePadded<Mutex<Vec<usize>>>> = (0..plan.tasks)
            .map(|_| CachePadded::new(Mutex::new(Vec::new())))
            .collect();
        let latch = CountLatch::new(plan.tasks);
        let abandon = AtomicBool::new(false);
        let reserve = bucket_reserve(plan.chunk);
        let cancel_poll = self.cancel_poll;

        let waited = pool.scope(|s| {
            for (task, slot) in slots.iter().enumerate() {
                let range = plan.range(task, frontier.len());
                if range.is_empty() {
                    trace!(level, task, "empty chunk");
                    latch.count_down();
                    continue;
                }
                let chunk = frontier.chunk(range);
                let (latch, abandon) = (&latch, &abandon);
                s.spawn(move |_| {
                    let _done = LatchGuard::new(latch);
                    if abandon.load(Ordering::Acquire) {
                        return;
                    }
                    let mut out = Vec::with_capacity(reserve);
                    expand_chunk(graph, visited, distances, chunk, next_level, &mut out);
                    *lock(&**slot) = out;
                });
            }

            let waited = latch.wait_or_cancel(cancel, cancel_poll);
            if waited == LatchWait::Cancelled {
                // Tasks still queued skip their chunk; running ones finish.
                abandon.store(true, Ordering::Release);
            }
            waited
        });

        if waited == LatchWait::Cancelled {
            return Ok((LevelOutcome::Cancelled, plan));
        }

        let buckets = slots
            .iter()
            .map(|slot| core::mem::take(&mut *lock(&**slot)))
            .collect();
        Ok((LevelOutcome::Expanded(Frontier::from_buckets(buckets)), plan))
    }
}

/// Claims every unvisited neighbour of `chunk`, records its level and appends it
/// to `out`.
#[inline]
fn expand_chunk(
    graph: &Graph,
    visited: &VisitedSet,
    distances: &DistanceTable,
    chunk: &[usize],
    next_level: u32,
    out: &mut Vec<usize>,
) {
    for &u in chunk {
        for v in graph.neighbors(u) {
            if visited.claim(v) {
                distances.record(v, next_level);
                out.push(v);
            }
        }
    }
}

#[inline]
fn bucket_reserve(chunk: usize) -> usize {
    chunk.saturating_mul(2).clamp(16, MAX_BUCKET_RESERVE)
}
