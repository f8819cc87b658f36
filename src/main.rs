use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
    time::Instant,
};

use clap::{Parser, Subcommand};
use meander::{
    fs::{load_graph, save_graph},
    generate::random_graph,
    search::{Graph, SearchBudget, SearchResult},
    statistics::Stats,
};
use tqdm::tqdm;
use tracing_subscriber::EnvFilter;

/// Longest simple path search over weighted graphs
#[derive(Parser, Debug)]
#[command(name = "meander")]
#[command(about = "A longest simple path search engine over weighted graphs", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search a graph file for its longest simple path
    Search {
        /// Path to the graph file (JSON format)
        #[arg(short, long)]
        graph: PathBuf,

        /// Start node; omit to sweep every node as a start
        #[arg(short, long)]
        start: Option<usize>,

        /// Only accept paths terminating at this node
        #[arg(long)]
        goal: Option<usize>,

        /// Number of threads for the all-starts sweep (comma-separated list, e.g., "1,2,4,8")
        #[arg(short, long, value_delimiter = ',', default_value = "1")]
        threads: Vec<usize>,

        /// Give up on any single search after this many node expansions
        #[arg(long)]
        max_expansions: Option<u64>,

        /// Track visited nodes sparsely. Only pays off on huge graphs
        /// searched under a small expansion budget
        #[arg(long)]
        sparse_visited: bool,
    },

    /// Generate a seeded random graph file
    Gen {
        /// Number of nodes
        #[arg(short, long)]
        nodes: usize,

        /// Outgoing edges per node
        #[arg(short, long, default_value_t = 3)]
        degree: usize,

        /// Edge weights are drawn uniformly from [0, max_weight)
        #[arg(long, default_value_t = 10.0)]
        max_weight: f64,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Where to write the graph file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn run_single_search(graph: &Graph, start: usize, goal: Option<usize>, budget: &SearchBudget) {
    let mut stats = Stats::new();
    let start_time = Instant::now();

    let outcome = match goal {
        Some(goal) => graph
            .longest_path_between_with(start, goal, budget, &mut stats)
            .map(|maybe| {
                maybe.unwrap_or_else(|| {
                    println!("No simple path from {start} reaches {goal}");
                    std::process::exit(0)
                })
            }),
        None => graph.longest_path_from_with(start, budget, &mut stats),
    };

    let result = outcome.unwrap_or_else(|e| {
        eprintln!("search failed: {e}");
        std::process::exit(1)
    });

    let elapsed = start_time.elapsed();
    println!("Longest simple path from {start}: weight {}", result.weight);
    println!("Path ({} nodes): {:?}", result.path.len(), result.path);
    println!(
        "Explored {} nodes / {} edges (deepest path: {}) in {:.3}s",
        stats.get_nodes_expanded(),
        stats.get_edges_scanned(),
        stats.get_deepest_path(),
        elapsed.as_secs_f64()
    );
}

type SweepOutcome = (Option<(usize, SearchResult)>, Stats, usize);

fn better(best: &Option<(usize, SearchResult)>, candidate: &SearchResult) -> bool {
    match best {
        None => true,
        Some((_, current)) => candidate.weight > current.weight,
    }
}

fn sweep_single_threaded(graph: &Graph, budget: &SearchBudget) -> SweepOutcome {
    let mut best: Option<(usize, SearchResult)> = None;
    let mut stats = Stats::new();
    let mut failures = 0usize;

    for start in tqdm(0..graph.node_count()) {
        match graph.longest_path_from_with(start, budget, &mut stats) {
            Ok(result) => {
                if better(&best, &result) {
                    best = Some((start, result));
                }
            }
            Err(e) => {
                tracing::warn!(start, error = %e, "search gave up");
                failures += 1;
            }
        }
    }
    (best, stats, failures)
}

fn sweep_threaded(graph: &Arc<Graph>, num_threads: usize, budget: &SearchBudget) -> SweepOutcome {
    let node_count = graph.node_count();
    // coarse batches: individual searches are heavy, contention is not the problem
    let batch_size = 64;
    let next_batch = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..num_threads)
        .map(|_thread_id| {
            let graph = Arc::clone(graph);
            let next_batch = Arc::clone(&next_batch);
            let budget = budget.clone();

            thread::spawn(move || {
                let mut local_best: Option<(usize, SearchResult)> = None;
                let mut local_stats = Stats::new();
                let mut local_failures = 0usize;

                loop {
                    // Atomically grab the next batch of start nodes
                    let batch_start = next_batch.fetch_add(batch_size, Ordering::Relaxed);
                    if batch_start >= node_count {
                        break;
                    }
                    let batch_end = std::cmp::min(batch_start + batch_size, node_count);

                    for start in batch_start..batch_end {
                        match graph.longest_path_from_with(start, &budget, &mut local_stats) {
                            Ok(result) => {
                                if better(&local_best, &result) {
                                    local_best = Some((start, result));
                                }
                            }
                            Err(e) => {
                                tracing::warn!(start, error = %e, "search gave up");
                                local_failures += 1;
                            }
                        }
                    }
                }

                (local_best, local_stats, local_failures)
            })
        })
        .collect();

    let mut best: Option<(usize, SearchResult)> = None;
    let mut combined_stats = Stats::new();
    let mut failures = 0usize;
    for handle in handles {
        let (local_best, local_stats, local_failures) = handle.join().expect("Thread panicked");
        if let Some((start, result)) = local_best
            && better(&best, &result)
        {
            best = Some((start, result));
        }
        combined_stats = combined_stats.merge(&local_stats);
        failures += local_failures;
    }
    (best, combined_stats, failures)
}

fn run_sweep_job(graph: &Arc<Graph>, num_threads: usize, budget: &SearchBudget) {
    let node_count = graph.node_count();
    println!("\n==========");
    println!("Sweeping {node_count} start nodes with threads={num_threads}");
    println!("==========");

    let start_time = Instant::now();
    let (best, stats, failures) = if num_threads == 1 {
        sweep_single_threaded(graph, budget)
    } else {
        sweep_threaded(graph, num_threads, budget)
    };
    let elapsed = start_time.elapsed();

    match best {
        Some((start, result)) => {
            println!(
                "Best start: {start} with weight {} over {} nodes",
                result.weight,
                result.path.len()
            );
            println!("Path: {:?}", result.path);
        }
        None => println!("No search completed within budget"),
    }
    if failures > 0 {
        println!("{failures}/{node_count} searches gave up (budget or cancellation)");
    }

    let searches = stats.get_searches().max(1);
    println!(
        "Avg per search: {:.2} nodes expanded, {:.2} edges scanned",
        stats.get_nodes_expanded() as f64 / searches as f64,
        stats.get_edges_scanned() as f64 / searches as f64
    );
    println!(
        "Completed {} searches in {:.2}s ({:.2} searches/s)",
        stats.get_searches(),
        elapsed.as_secs_f64(),
        stats.get_searches() as f64 / elapsed.as_secs_f64()
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    match args.command {
        Command::Search {
            graph,
            start,
            goal,
            threads,
            max_expansions,
            sparse_visited,
        } => {
            println!("Loading graph...");
            let graph = Arc::new(load_graph(&graph).unwrap_or_else(|e| {
                eprintln!("could not load graph: {e}");
                std::process::exit(1)
            }));
            println!(
                "Graph loaded with {} nodes and {} edges",
                graph.node_count(),
                graph.edge_count()
            );

            let budget = SearchBudget {
                max_expansions,
                abort: None,
                sparse_visited,
            };

            match start {
                Some(start) => run_single_search(&graph, start, goal, &budget),
                None => {
                    if goal.is_some() {
                        eprintln!("--goal requires --start");
                        std::process::exit(2)
                    }
                    for &num_threads in &threads {
                        run_sweep_job(&graph, num_threads, &budget);
                    }
                    println!("\n==========");
                    println!("All sweeps completed!");
                    println!("==========");
                }
            }
        }

        Command::Gen {
            nodes,
            degree,
            max_weight,
            seed,
            output,
        } => {
            let graph = random_graph(nodes, degree, max_weight, seed);
            save_graph(&output, &graph).unwrap_or_else(|e| {
                eprintln!("could not save graph: {e}");
                std::process::exit(1)
            });
            println!(
                "Wrote {} nodes / {} edges to {}",
                graph.node_count(),
                graph.edge_count(),
                output.display()
            );
        }
    }
}
