use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use graph_index_core::{BuildConfig, Edge, Graph, LogProgress, DEFAULT_PROGRESS_INTERVAL};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "graph-index-bench", about = "Build and query benchmark for graph-index-core")]
struct Args {
    /// Edge generator to benchmark.
    #[arg(value_enum, default_value_t = Mode::All)]
    mode: Mode,

    /// Target node count for generated graphs.
    #[arg(default_value_t = 1_000_000)]
    node_count: u64,

    /// Benchmark an edge file (`src<TAB>dst` per line) instead of a generator.
    /// Cannot be combined with `mode` or `node_count`.
    #[arg(long, conflicts_with_all = ["mode", "node_count"])]
    input: Option<PathBuf>,

    /// Write the replayed edge stream of the last built graph here.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Number of random lookups per query benchmark.
    #[arg(long, default_value_t = 100_000)]
    queries: u64,

    /// Log a progress line every this many ingested edges (0 disables).
    #[arg(long, env = "GRAPH_INDEX_PROGRESS_INTERVAL", default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    progress_interval: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run every generator (default)
    All,
    /// Single path 0 -> 1 -> ... -> n-1
    Chain,
    /// One hub pointing at every other node
    Star,
    /// Preferential attachment via edge sampling (hub-and-spoke)
    Scalefree,
    /// Uniform random edges, including duplicates and self-loops
    Random,
    /// Small dense clusters with many repeated edges
    Dense,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = BuildConfig::default().with_progress_interval(args.progress_interval);

    println!("graph-index-bench");
    println!("=================");
    println!();

    let last = if let Some(path) = &args.input {
        let t = Instant::now();
        let graph = Graph::from_path_with(path, &config, &mut LogProgress)
            .with_context(|| format!("failed to load edge file {}", path.display()))?;
        println!("--- {} ---", path.display());
        report_build(&graph, t.elapsed().as_secs_f64());
        run_queries(&graph, args.queries);
        graph
    } else {
        let generators: Vec<(&str, fn(u64) -> Vec<Edge>)> = match args.mode {
            Mode::Chain => vec![("Chain", gen_chain)],
            Mode::Star => vec![("Star", gen_star)],
            Mode::Scalefree => vec![("Scale-free (edge sampling)", gen_scale_free)],
            Mode::Random => vec![("Uniform random", gen_random)],
            Mode::Dense => vec![("Dense clusters", gen_dense)],
            Mode::All => vec![
                ("Chain", gen_chain as fn(u64) -> Vec<Edge>),
                ("Star", gen_star),
                ("Scale-free (edge sampling)", gen_scale_free),
                ("Uniform random", gen_random),
                ("Dense clusters", gen_dense),
            ],
        };
        if args.node_count < 2 {
            bail!("node_count must be at least 2, got {}", args.node_count);
        }

        let mut last = Graph::default();
        for (name, generator) in generators {
            last = run_benchmark(name, generator, args.node_count, &config, args.queries);
        }
        last
    };

    if let Some(path) = &args.export {
        let t = Instant::now();
        let written = last
            .save_as_text(path)
            .with_context(|| format!("failed to export to {}", path.display()))?;
        println!(
            "Exported {} edges to {} in {:.2}s",
            written,
            path.display(),
            t.elapsed().as_secs_f64()
        );
    }

    Ok(())
}

fn run_benchmark(
    name: &str,
    generator: fn(u64) -> Vec<Edge>,
    node_count: u64,
    config: &BuildConfig,
    queries: u64,
) -> Graph {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let edges = generator(node_count);
    println!(
        "Generated {} raw edges in {:.2}s",
        edges.len(),
        t.elapsed().as_secs_f64()
    );

    let t = Instant::now();
    let graph = Graph::build(edges, config, &mut LogProgress);
    report_build(&graph, t.elapsed().as_secs_f64());
    run_queries(&graph, queries);
    graph
}

fn report_build(graph: &Graph, secs: f64) {
    println!(
        "Built in {:.2}s: {} nodes, {} edges, ~{:.0}MB",
        secs,
        graph.node_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );
}

fn run_queries(graph: &Graph, queries: u64) {
    let nodes = graph.nodes();
    if nodes.is_empty() || queries == 0 {
        println!();
        return;
    }
    let mut rng = FastRng::new(2024);

    println!();
    println!("{:>12} {:>12} {:>12} {:>10}", "query", "calls", "hits", "time");
    println!("{:->12} {:->12} {:->12} {:->10}", "", "", "", "");

    let t = Instant::now();
    let mut hits = 0u64;
    for _ in 0..queries {
        let src = nodes[rng.next(nodes.len() as u64) as usize];
        let dst = nodes[rng.next(nodes.len() as u64) as usize];
        if graph.has_edge(src, dst) {
            hits += 1;
        }
    }
    print_row("has_edge", queries, hits, t.elapsed().as_secs_f64());

    let t = Instant::now();
    let mut total = 0u64;
    for _ in 0..queries {
        let v = nodes[rng.next(nodes.len() as u64) as usize];
        total += graph.neighbors(v).map(|n| n.len() as u64).unwrap_or(0);
    }
    print_row("neighbors", queries, total, t.elapsed().as_secs_f64());

    let t = Instant::now();
    let replayed = graph.edges().count() as u64;
    print_row("iterate", 1, replayed, t.elapsed().as_secs_f64());

    info!(replayed, edges = graph.edge_count(), "replay finished");
    println!();
}

fn print_row(name: &str, calls: u64, hits: u64, secs: f64) {
    println!("{:>12} {:>12} {:>12} {:>8.1}ms", name, calls, hits, secs * 1000.0);
}

// ---------------------------------------------------------------------------
// Generators: deterministic, single-threaded, O(edges)
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
}

fn gen_chain(node_count: u64) -> Vec<Edge> {
    (0..node_count - 1).map(|i| Edge::new(i, i + 1)).collect()
}

fn gen_star(node_count: u64) -> Vec<Edge> {
    (1..node_count).map(|i| Edge::new(0, i)).collect()
}

/// Preferential attachment by picking a random endpoint of an existing edge,
/// so high-degree nodes attract more edges.
fn gen_scale_free(node_count: u64) -> Vec<Edge> {
    let edges_per_node = 10u64;
    let mut rng = FastRng::new(12345);
    let mut edges = Vec::with_capacity((node_count * edges_per_node) as usize);
    let mut endpoints: Vec<u64> = Vec::with_capacity((node_count * edges_per_node * 2) as usize);

    let seed = 5u64.min(node_count);
    for i in 0..seed {
        for j in (i + 1)..seed {
            edges.push(Edge::new(i, j));
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new_node in seed..node_count {
        for _ in 0..edges_per_node.min(new_node) {
            let target = endpoints[rng.next(endpoints.len() as u64) as usize];
            edges.push(Edge::new(new_node, target));
            endpoints.push(new_node);
            endpoints.push(target);
        }
    }
    edges
}

/// ~10 edges per node on average, drawn uniformly with replacement.
fn gen_random(node_count: u64) -> Vec<Edge> {
    let mut rng = FastRng::new(54321);
    (0..node_count * 10)
        .map(|_| Edge::new(rng.next(node_count), rng.next(node_count)))
        .collect()
}

/// Clusters of 64 nodes, each node emitting 128 edges inside its cluster.
/// Roughly half the raw edges are duplicates.
fn gen_dense(node_count: u64) -> Vec<Edge> {
    let cluster = 64u64.min(node_count);
    let mut rng = FastRng::new(99999);
    let mut edges = Vec::with_capacity((node_count * 128) as usize);
    for v in 0..node_count {
        let base = v - v % cluster;
        let width = cluster.min(node_count - base);
        for _ in 0..128 {
            edges.push(Edge::new(v, base + rng.next(width)));
        }
    }
    edges
}
