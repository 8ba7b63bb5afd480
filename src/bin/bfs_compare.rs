//! Serial vs parallel BFS timing on a generated graph.
//!
//! Prints a plain-text block:
//!
//! ```text
//! Times for 100000 vertices and 1000000 connections:
//! Serial: 21
//! Parallel: 9
//! ```
//!
//! or, with `--json`, a single JSON object per run (the form the xtask sweep collects).

use std::time::Instant;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use wavefront::{parallel_bfs, BfsConfig, Graph};

/// Serial vs parallel BFS comparison.
#[derive(Parser, Debug)]
#[command(name = "bfs-compare")]
#[command(about = "Time sequential and level-synchronous parallel BFS on a random graph")]
struct Args {
    /// Number of vertices.
    #[arg(short, long, default_value = "100000")]
    vertices: usize,

    /// Number of random undirected edges.
    #[arg(short, long, default_value = "1000000")]
    edges: usize,

    /// Start vertex.
    #[arg(long, default_value = "0")]
    start: usize,

    /// Worker cap (defaults to the hardware concurrency, at most 32).
    #[arg(short, long)]
    threads: Option<usize>,

    /// Minimum frontier slice per task.
    #[arg(short, long)]
    grain: Option<usize>,

    /// Random seed for reproducibility.
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Emit a JSON report instead of the text block.
    #[arg(long)]
    json: bool,

    /// Log level for library diagnostics.
    #[arg(long, default_value = "warn")]
    log_level: Level,
}

#[derive(Serialize, Debug)]
struct Report {
    vertices: usize,
    connections: usize,
    threads: usize,
    grain: usize,
    serial_ms: u128,
    parallel_ms: u128,
    reached: usize,
    depth: u32,
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

    #[allow(clippy::cast_possible_truncation)]
    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }
}

fn random_graph(vertices: usize, edges: usize, seed: u64) -> Graph {
    let mut rng = XorShift64::new(seed);
    let mut graph = Graph::new(vertices);
    for _ in 0..edges {
        let u = rng.below(vertices);
        let v = rng.below(vertices);
        graph.add_edge(u, v);
    }
    graph
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    ensure!(args.vertices > 0, "--vertices must be positive");

    let mut config = BfsConfig::default();
    if let Some(threads) = args.threads {
        config = config.with_max_workers(threads);
    }
    if let Some(grain) = args.grain {
        config = config.with_grain_size(grain);
    }

    info!(vertices = args.vertices, edges = args.edges, seed = args.seed, "generating graph");
    let graph = random_graph(args.vertices, args.edges, args.seed);

    let started = Instant::now();
    let serial = graph.bfs(args.start);
    let serial_ms = started.elapsed().as_millis();

    let started = Instant::now();
    let outcome = parallel_bfs(&graph, args.start, &config).context("parallel BFS failed")?;
    let parallel_ms = started.elapsed().as_millis();

    ensure!(
        outcome.distances == serial,
        "parallel and serial distances differ"
    );

    let report = Report {
        vertices: args.vertices,
        connections: graph.edge_count(),
        threads: config.effective_workers(),
        grain: config.effective_grain(),
        serial_ms,
        parallel_ms,
        reached: outcome.distances.reached(),
        depth: outcome.depth,
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string(&report).context("failed to encode report")?
        );
    } else {
        println!(
            "Times for {} vertices and {} connections:",
            report.vertices, report.connections
        );
        println!("Serial: {}", report.serial_ms);
        println!("Parallel: {}", report.parallel_ms);
    }

    Ok(())
}
