//! graphtrace: generate a weighted geometric graph and print its
//! breadth-first and Kruskal traces.
//!
//! Builds a seeded random geometric graph (or reads one from JSON),
//! computes both traces, and prints them together with per-stage
//! diagnostics. Useful for:
//!
//! - Inspecting the exact step order a renderer will replay
//! - Checking a single playback frame (`--frame`)
//! - Measuring how build and trace time scale with node count
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin graphtrace -- [OPTIONS]
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use graphtrace_core::diagnostics::{Clock, TraceDiagnostics, trace_with_diagnostics};
use graphtrace_core::{
    BfsFrame, GeneratorConfig, GeometricInput, MstFrame, NodeId, TraceResult, geometric,
};
use serde::Serialize;

/// Weighted geometric graph traces.
///
/// Generates (or loads) a graph, computes its BFS and Kruskal traces, and
/// prints the traces plus per-stage timing and count diagnostics.
#[derive(Parser)]
#[command(name = "graphtrace", version)]
struct Cli {
    /// Number of nodes to generate.
    #[arg(long, default_value_t = GeneratorConfig::DEFAULT_NODE_COUNT)]
    nodes: usize,

    /// Connection radius: nodes at most this far apart are joined.
    #[arg(long, default_value_t = GeneratorConfig::DEFAULT_RADIUS)]
    radius: f64,

    /// Standard deviation of the normal distribution for node coordinates.
    #[arg(long, default_value_t = GeneratorConfig::DEFAULT_POSITION_SIGMA)]
    sigma: f64,

    /// Random seed.
    #[arg(long, default_value_t = GeneratorConfig::DEFAULT_SEED)]
    seed: u64,

    /// Full generator config as a JSON string.
    ///
    /// When provided, the individual generator flags are ignored.
    /// The JSON must be a valid `GeneratorConfig` serialization.
    #[arg(long)]
    config_json: Option<String>,

    /// Read positions and edges from a JSON `GeometricInput` file instead
    /// of generating them.
    #[arg(long, conflicts_with = "config_json")]
    input: Option<PathBuf>,

    /// BFS start node.
    #[arg(long, default_value_t = 0)]
    start: NodeId,

    /// Also print the playback state at this frame counter value.
    #[arg(long)]
    frame: Option<usize>,

    /// Number of runs for averaging.
    #[arg(long, default_value_t = 1, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    runs: usize,

    /// Output traces and diagnostics as JSON instead of text.
    #[arg(long)]
    json: bool,
}

/// Everything written by `--json`.
#[derive(Serialize)]
struct JsonOutput<'a> {
    input: &'a GeometricInput,
    result: &'a TraceResult,
    diagnostics: &'a TraceDiagnostics,
    #[serde(skip_serializing_if = "Option::is_none")]
    bfs_frame: Option<BfsFrame<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mst_frame: Option<MstFrame<'a>>,
}

/// Build a [`GeneratorConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and all
/// individual generator flags are ignored.
fn config_from_cli(cli: &Cli) -> Result<GeneratorConfig, String> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"));
    }

    Ok(GeneratorConfig {
        node_count: cli.nodes,
        radius: cli.radius,
        position_sigma: cli.sigma,
        seed: cli.seed,
    })
}

/// Load the graph input from `--input`, or generate it.
fn input_from_cli(cli: &Cli) -> Result<GeometricInput, String> {
    if let Some(ref path) = cli.input {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Error reading {}: {e}", path.display()))?;
        let input: GeometricInput = serde_json::from_str(&text)
            .map_err(|e| format!("Error parsing {}: {e}", path.display()))?;
        eprintln!(
            "Input: {} ({} nodes, {} edges)",
            path.display(),
            input.node_count(),
            input.edges.len(),
        );
        return Ok(input);
    }

    let config = config_from_cli(cli)?;
    eprintln!("Config: {config:#?}");
    geometric::generate(&config).map_err(|e| format!("Generator error: {e}"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let input = match input_from_cli(&cli) {
        Ok(input) => input,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    eprintln!("Start node: {}", cli.start);
    eprintln!("Runs: {}", cli.runs);
    eprintln!();

    let mut all_diagnostics = Vec::with_capacity(cli.runs);

    for run in 0..cli.runs {
        if cli.runs > 1 {
            eprintln!("--- Run {}/{} ---", run + 1, cli.runs);
        }

        match trace_with_diagnostics(&input, cli.start, &StdClock) {
            Ok((result, diagnostics)) => {
                // Traces are identical across runs; print them once.
                if run == 0 {
                    let bfs_frame = cli.frame.and_then(|step| result.bfs.frame(step));
                    let mst_frame = cli.frame.and_then(|step| result.mst.frame(step));

                    if cli.json {
                        let output = JsonOutput {
                            input: &input,
                            result: &result,
                            diagnostics: &diagnostics,
                            bfs_frame,
                            mst_frame,
                        };
                        match serde_json::to_string_pretty(&output) {
                            Ok(json) => println!("{json}"),
                            Err(e) => {
                                eprintln!("Error serializing output: {e}");
                                return ExitCode::FAILURE;
                            }
                        }
                    } else {
                        print_traces(&result);
                        if let Some(step) = cli.frame {
                            print_frames(step, bfs_frame.as_ref(), mst_frame.as_ref());
                        }
                        println!("{}", diagnostics.report());
                    }
                } else if !cli.json {
                    println!("{}", diagnostics.report());
                }

                all_diagnostics.push(diagnostics);
            }
            Err(e) => {
                eprintln!("Trace error: {e}");
                return ExitCode::FAILURE;
            }
        }

        if cli.runs > 1 {
            eprintln!();
        }
    }

    if cli.runs > 1 {
        print_multi_run_summary(&all_diagnostics);
    }

    ExitCode::SUCCESS
}

/// [`Clock`] implementation backed by [`std::time::Instant`].
struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed(&self, since: &Instant) -> Duration {
        since.elapsed()
    }
}

/// Print both traces, one step per line.
fn print_traces(result: &TraceResult) {
    println!(
        "BFS from {} ({} steps)\n{}",
        result.bfs.start(),
        result.bfs.len(),
        "=".repeat(60),
    );
    for (i, step) in result.bfs.steps().iter().enumerate() {
        println!("{i:>4}  {} -> {}", step.from, step.to);
    }
    println!();

    println!(
        "Kruskal ({} considered, {} accepted, total weight {:.1})\n{}",
        result.mst.len(),
        result.mst.accepted_count(),
        result.mst.total_weight(),
        "=".repeat(60),
    );
    for (i, step) in result.mst.steps().iter().enumerate() {
        let verdict = if step.accepted { "accept" } else { "reject" };
        println!(
            "{i:>4}  {} - {}  {:>8.1}  {verdict}",
            step.edge.u, step.edge.v, step.edge.weight,
        );
    }
    println!();
}

/// Print the playback state at frame counter `step`.
fn print_frames(step: usize, bfs: Option<&BfsFrame<'_>>, mst: Option<&MstFrame<'_>>) {
    println!("Frame {step}\n{}", "=".repeat(60));
    match bfs {
        Some(frame) => println!(
            "BFS  [{}] current {} -> {}, visited nodes {:?}",
            frame.index, frame.current.from, frame.current.to, frame.visited_nodes,
        ),
        None => println!("BFS  (empty trace)"),
    }
    match mst {
        Some(frame) => println!(
            "MST  [{}] current {} - {} ({}), {} tree edges so far",
            frame.index,
            frame.current.edge.u,
            frame.current.edge.v,
            if frame.current.accepted {
                "accept"
            } else {
                "reject"
            },
            frame.tree_edges.len(),
        ),
        None => println!("MST  (empty trace)"),
    }
    println!();
}

/// Function pointer type for extracting a stage duration from diagnostics.
type StageExtractor = fn(&TraceDiagnostics) -> Duration;

/// Print aggregated statistics across multiple runs.
#[allow(clippy::cast_precision_loss)]
fn print_multi_run_summary(all_diagnostics: &[TraceDiagnostics]) {
    println!();
    println!(
        "Summary ({} runs)\n{}",
        all_diagnostics.len(),
        "=".repeat(60),
    );

    if all_diagnostics.is_empty() {
        println!("Warning: no diagnostics to summarize");
        return;
    }

    let durations: Vec<f64> = all_diagnostics
        .iter()
        .map(|d| d.total_duration.as_secs_f64() * 1000.0)
        .collect();

    let min = durations.iter().copied().reduce(f64::min).unwrap_or(0.0);
    let max = durations.iter().copied().reduce(f64::max).unwrap_or(0.0);
    let mean = durations.iter().sum::<f64>() / durations.len() as f64;

    println!("Total duration: min={min:.3}ms  mean={mean:.3}ms  max={max:.3}ms");

    println!();
    println!("{:<16} {:>12}", "Stage", "Mean (ms)");
    println!("{}", "-".repeat(30));

    let stage_extractors: &[(&str, StageExtractor)] = &[
        ("Build", |d| d.build.duration),
        ("BFS", |d| d.bfs.duration),
        ("MST", |d| d.mst.duration),
    ];

    for (name, extractor) in stage_extractors {
        let stage_mean = all_diagnostics
            .iter()
            .map(|d| extractor(d).as_secs_f64() * 1000.0)
            .sum::<f64>()
            / all_diagnostics.len() as f64;
        println!("{name:<16} {stage_mean:>10.3}ms");
    }
}
