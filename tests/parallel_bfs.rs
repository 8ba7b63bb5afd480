#![cfg(not(loom))]

use std::collections::HashSet;
use std::thread;
use std::time::Duration;

use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use wavefront::{
    parallel_bfs, parallel_bfs_with_cancel, BfsConfig, CancelToken, Graph, TraversalStatus,
};

fn wide_config(workers: usize) -> BfsConfig {
    BfsConfig::default()
        .with_max_workers(workers)
        .with_grain_size(256)
}

struct XorShift64 {
    a: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { a: if seed == 0 { 1 } else { seed } }
    }

    fn next(&mut self) -> u64 {
        let mut x = self.a;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.a = x;
        x
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }
}

fn random_graph(vertices: usize, edges: usize, seed: u64) -> Graph {
    let mut rng = XorShift64::new(seed);
    let mut g = Graph::new(vertices);
    for _ in 0..edges {
        let u = rng.below(vertices);
        let v = rng.below(vertices);
        g.add_edge(u, v);
    }
    g
}

#[test]
fn path_graph_levels() {
    let g = Graph::from_edges(5, (0..4).map(|v| (v, v + 1)));
    let outcome = parallel_bfs(&g, 0, &wide_config(4)).unwrap();
    assert!(outcome.is_complete());
    assert_eq!(
        outcome.distances.to_vec(),
        vec![Some(0), Some(1), Some(2), Some(3), Some(4)]
    );
    assert_eq!(outcome.depth, 4);
}

#[test]
fn disjoint_components_stay_undiscovered() {
    let g = Graph::from_edges(4, [(0, 1), (2, 3)]);
    let outcome = parallel_bfs(&g, 0, &wide_config(8)).unwrap();
    assert_eq!(outcome.distances.to_vec(), vec![Some(0), Some(1), None, None]);
}

#[test]
fn star_has_no_duplicate_leaves() {
    let leaves = 1000;
    let g = Graph::from_edges(leaves + 1, (1..=leaves).map(|v| (0, v)));
    let outcome = parallel_bfs(&g, 0, &wide_config(16)).unwrap();

    assert!(outcome.is_complete());
    assert_eq!(outcome.stats.len(), 2);
    assert_eq!(outcome.stats[1].frontier, leaves);
    assert_eq!(outcome.distances.reached(), leaves + 1);
    assert!((1..=leaves).all(|v| outcome.distances.get(v) == Some(1)));
}

#[test]
fn out_of_range_edges_do_not_affect_traversal() {
    let mut g = Graph::new(3);
    g.add_edge(0, 1);
    g.add_edge(1, 7);
    g.add_edge(9, 2);
    let outcome = parallel_bfs(&g, 0, &wide_config(2)).unwrap();
    assert_eq!(outcome.distances.to_vec(), vec![Some(0), Some(1), None]);
}

#[test]
fn invalid_start_vertex_is_ignored() {
    let g = Graph::from_edges(3, [(0, 1)]);
    let outcome = parallel_bfs(&g, 42, &wide_config(2)).unwrap();
    assert_eq!(outcome.status, TraversalStatus::InvalidStart);
    assert_eq!(outcome.distances.reached(), 0);
}

#[test]
fn matches_sequential_bfs_on_random_graph() {
    let g = random_graph(20_000, 60_000, 0x5eed);
    let expected = g.bfs(0);
    let outcome = parallel_bfs(&g, 0, &wide_config(8)).unwrap();
    assert!(outcome.is_complete());
    assert_eq!(outcome.distances, expected);
}

#[test]
fn fan_out_does_not_change_result() {
    let g = random_graph(30_000, 90_000, 42);
    let single = parallel_bfs(&g, 0, &wide_config(1)).unwrap();
    let wide = parallel_bfs(&g, 0, &wide_config(16)).unwrap();
    assert!(single.stats.iter().all(|s| s.tasks == 1));
    assert!(wide.stats.iter().any(|s| s.tasks > 1));
    assert_eq!(single.distances, wide.distances);
    assert_eq!(single.depth, wide.depth);
}

#[test]
fn every_vertex_enters_exactly_one_frontier() {
    // Frontier sizes must add up to the reached count: nothing lost, nothing repeated.
    let g = random_graph(25_000, 100_000, 7);
    let outcome = parallel_bfs(&g, 0, &wide_config(12)).unwrap();
    let expanded: usize = outcome.stats.iter().map(|s| s.frontier).sum();
    assert_eq!(expanded, outcome.distances.reached());

    let mut per_level = vec![0usize; outcome.depth as usize + 1];
    for level in outcome.distances.iter().flatten() {
        per_level[level as usize] += 1;
    }
    for s in &outcome.stats {
        assert_eq!(per_level[s.level as usize], s.frontier);
    }
}

#[test]
fn adjacent_vertices_differ_by_at_most_one_level() {
    let g = random_graph(10_000, 25_000, 99);
    let outcome = parallel_bfs(&g, 0, &wide_config(8)).unwrap();
    for u in 0..g.vertex_count() {
        let Some(du) = outcome.distances.get(u) else {
            continue;
        };
        for v in g.neighbors(u) {
            let dv = outcome
                .distances
                .get(v)
                .expect("neighbour of a reached vertex is reached");
            assert!(du.abs_diff(dv) <= 1, "edge {u}-{v}: {du} vs {dv}");
        }
    }
}

#[test]
fn agrees_with_petgraph() {
    use petgraph::graph::{NodeIndex, UnGraph};
    use petgraph::visit::Bfs;

    let g = random_graph(5_000, 12_000, 1234);
    let mut edges = Vec::new();
    for u in 0..g.vertex_count() {
        for v in g.neighbors(u) {
            if u <= v {
                edges.push((u as u32, v as u32));
            }
        }
    }
    let mut pg = UnGraph::<(), ()>::from_edges(edges);
    while pg.node_count() < g.vertex_count() {
        pg.add_node(());
    }

    let mut reachable = HashSet::new();
    let mut bfs = Bfs::new(&pg, NodeIndex::new(0));
    while let Some(n) = bfs.next(&pg) {
        reachable.insert(n.index());
    }

    let outcome = parallel_bfs(&g, 0, &wide_config(8)).unwrap();
    for v in 0..g.vertex_count() {
        assert_eq!(outcome.distances.get(v).is_some(), reachable.contains(&v), "vertex {v}");
    }
}

#[test]
fn cancellation_from_another_thread_stops_the_run() {
    // A long path forces thousands of inline levels; cancel partway through.
    let n = 500_000;
    let g = Graph::from_edges(n, (0..n - 1).map(|v| (v, v + 1)));
    let cancel = CancelToken::new();

    let outcome = thread::scope(|s| {
        let c = cancel.clone();
        s.spawn(move || {
            thread::sleep(Duration::from_millis(5));
            c.cancel();
        });
        parallel_bfs_with_cancel(&g, 0, &wide_config(4), &cancel).unwrap()
    });

    match outcome.status {
        TraversalStatus::Cancelled => {
            let reached = outcome.distances.reached();
            assert!(reached < n);
            // Whatever was published is a correct prefix of the path.
            for (v, level) in outcome.distances.iter().enumerate() {
                assert_eq!(level, (v < reached).then_some(v as u32));
            }
        }
        TraversalStatus::Completed => assert_eq!(outcome.distances.reached(), n),
        TraversalStatus::InvalidStart => unreachable!("start 0 is in range"),
    }
}

/// Fires the token as soon as a level is handed to the worker pool.
struct CancelOnDispatch {
    cancel: CancelToken,
}

impl<S: Subscriber> Layer<S> for CancelOnDispatch {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        // Only the pooled dispatch event carries a `chunk` field.
        if event.metadata().fields().field("chunk").is_some() {
            self.cancel.cancel();
        }
    }
}

#[test]
fn cancellation_during_a_pooled_level_abandons_it() {
    // Level 1 is 1024 hubs, split over two pool tasks of 512 hubs x 1024 leaves each.
    let hubs = 1024;
    let leaves = 1024;
    let n = 1 + hubs + hubs * leaves;
    let mut g = Graph::new(n);
    for h in 1..=hubs {
        g.add_edge(0, h);
        let first_leaf = 1 + hubs + (h - 1) * leaves;
        for leaf in first_leaf..first_leaf + leaves {
            g.add_edge(h, leaf);
        }
    }

    let cancel = CancelToken::new();
    let subscriber = tracing_subscriber::registry().with(CancelOnDispatch {
        cancel: cancel.clone(),
    });
    let outcome = tracing::subscriber::with_default(subscriber, || {
        parallel_bfs_with_cancel(&g, 0, &wide_config(2), &cancel).unwrap()
    });

    assert!(cancel.is_cancelled());
    assert_eq!(outcome.status, TraversalStatus::Cancelled);

    let last = outcome.stats.last().expect("level 1 was dispatched");
    assert_eq!(last.level, 1);
    assert_eq!(last.frontier, hubs);
    assert!(last.tasks > 1, "level 1 ran inline: {last:?}");

    // Level 0 completed before the cancel; whatever level 1 published is correct.
    assert_eq!(outcome.distances.get(0), Some(0));
    assert!((1..=hubs).all(|h| outcome.distances.get(h) == Some(1)));
    assert!(outcome.distances.iter().flatten().all(|level| level <= 2));
}
