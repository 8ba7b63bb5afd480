use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Wavefront workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Time serial vs parallel BFS across worker counts and graph sizes
    Sweep {
        /// Comma-separated worker counts
        #[arg(long, default_value = "1,2,4,6,8")]
        threads: String,

        /// Comma-separated vertex counts
        #[arg(long, default_value = "10000,100000,1000000")]
        vertices: String,

        /// Edges generated per vertex
        #[arg(long, default_value_t = 10)]
        degree: usize,

        /// Random seed passed to every run
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Generate report only (reuse the last CSV)
        #[arg(long, default_value_t = false)]
        report_only: bool,
    },
}

/// One `bfs-compare --json` line.
#[derive(Deserialize, Debug, Clone)]
struct Row {
    vertices: usize,
    connections: usize,
    threads: usize,
    serial_ms: u128,
    parallel_ms: u128,
    reached: usize,
    depth: u32,
}

const RESULTS_DIR: &str = "benchmark_results";
const CSV_NAME: &str = "perf_data.csv";

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sweep {
            threads,
            vertices,
            degree,
            seed,
            report_only,
        } => {
            if !report_only {
                let threads = parse_list(&threads).context("invalid --threads")?;
                let vertices = parse_list(&vertices).context("invalid --vertices")?;
                let rows = run_sweep(&threads, &vertices, degree, seed)?;
                write_csv(&rows)?;
            }
            generate_report()?;
        }
    }

    Ok(())
}

fn parse_list(list: &str) -> Result<Vec<usize>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<usize>().with_context(|| format!("not a number: {s}")))
        .collect()
}

fn run_sweep(threads: &[usize], vertices: &[usize], degree: usize, seed: u64) -> Result<Vec<Row>> {
    // Build first to avoid measuring build time
    println!("Compiling bfs-compare...");
    let status = Command::new("cargo")
        .args(["build", "--release", "--bin", "bfs-compare"])
        .status()?;
    if !status.success() {
        anyhow::bail!("Failed to compile bfs-compare");
    }

    let binary = Path::new("target/release/bfs-compare");
    let mut rows = Vec::new();

    for &n in vertices {
        for &t in threads {
            println!("\n>>> {n} vertices, {t} workers");
            let start = Instant::now();

            let output = Command::new(binary)
                .arg("--vertices")
                .arg(n.to_string())
                .arg("--edges")
                .arg((n * degree).to_string())
                .arg("--threads")
                .arg(t.to_string())
                .arg("--seed")
                .arg(seed.to_string())
                .arg("--json")
                .output()
                .with_context(|| format!("Failed to run bfs-compare for {n} vertices / {t} workers"))?;

            if !output.status.success() {
                eprintln!(
                    "Warning: run failed for {n} vertices / {t} workers: {}",
                    String::from_utf8_lossy(&output.stderr)
                );
                continue;
            }

            let stdout = String::from_utf8_lossy(&output.stdout);
            for line in stdout.lines().filter(|l| l.starts_with('{')) {
                let row: Row = serde_json::from_str(line)
                    .with_context(|| format!("unexpected bfs-compare output: {line}"))?;
                println!(
                    "Serial: {} ms, Parallel: {} ms (reached {}, depth {})",
                    row.serial_ms, row.parallel_ms, row.reached, row.depth
                );
                rows.push(row);
            }
            println!("Finished in {:.2?}", start.elapsed());
        }
    }

    Ok(rows)
}

fn write_csv(rows: &[Row]) -> Result<()> {
    fs::create_dir_all(RESULTS_DIR)?;
    let path = Path::new(RESULTS_DIR).join(CSV_NAME);
    let mut file = fs::File::create(&path)?;

    let mut sorted = rows.to_vec();
    sorted.sort_by_key(|r| (r.vertices, r.connections, r.threads));

    writeln!(file, "vertices,connections,threads,serial_ms,parallel_ms")?;
    for r in &sorted {
        writeln!(
            file,
            "{},{},{},{},{}",
            r.vertices, r.connections, r.threads, r.serial_ms, r.parallel_ms
        )?;
    }

    println!("\n[csv] Written {} with {} rows", path.display(), sorted.len());
    Ok(())
}

fn read_csv(path: &Path) -> Result<Vec<(usize, usize, usize, u128, u128)>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("No sweep results at {}", path.display()))?;
    let mut rows = Vec::new();
    for line in content.lines().skip(1) {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 5 {
            continue;
        }
        rows.push((
            fields[0].parse()?,
            fields[1].parse()?,
            fields[2].parse()?,
            fields[3].parse()?,
            fields[4].parse()?,
        ));
    }
    Ok(rows)
}

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");
    let rows = read_csv(&Path::new(RESULTS_DIR).join(CSV_NAME))?;

    let report_path = Path::new(RESULTS_DIR).join("report.md");
    let mut file = fs::File::create(&report_path)?;

    writeln!(file, "# Serial vs Parallel BFS")?;
    writeln!(file)?;
    writeln!(file, "| Vertices | Connections | Workers | Serial (ms) | Parallel (ms) | Speedup |")?;
    writeln!(file, "|---|---|---|---|---|---|")?;

    for (vertices, connections, threads, serial, parallel) in rows {
        let speedup = if parallel > 0 {
            format!("**{:.2}x**", serial as f64 / parallel as f64)
        } else {
            "-".to_string()
        };
        writeln!(
            file,
            "| {vertices} | {connections} | {threads} | {serial} | {parallel} | {speedup} |"
        )?;
    }

    println!("Report written to {}", report_path.display());
    Ok(())
}
