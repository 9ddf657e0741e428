//! Approximate best-response convergence sweep.
//!
//! Trains approximate best responses against the uniform Kuhn strategy over a
//! grid of iteration counts and seeds, in parallel, and reports how the
//! sampled values close in on the exact best-response value.
//!
//! Usage:
//!   cargo run --release --bin br_sweep -- [OPTIONS]
//!
//! Options:
//!   --player <N>         Measured player seat, 0 or 1 (default: 0)
//!   --seeds <N>          Seeds per iteration count (default: 8)
//!   --output <FILE>      Output file (default: sweep.json)

use std::env;
use std::fs;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;

use br_solver::br::{approx_exploitability, exploitability, BrConfig, UniformStrategy};
use br_solver::games::kuhn::KuhnPoker;

const ITERATION_GRID: [u64; 4] = [500, 2_000, 8_000, 32_000];

/// One sweep cell: an independently seeded training run.
#[derive(Debug, Serialize)]
struct SweepResult {
    iterations: u64,
    seed: u64,
    value: f64,
    abs_error: f64,
    elapsed_seconds: f64,
}

#[derive(Debug, Serialize)]
struct SweepOutput {
    measured_player: usize,
    exact_value: f64,
    results: Vec<SweepResult>,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut player: usize = 0;
    let mut seeds: u64 = 8;
    let mut output_file = "sweep.json".to_string();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--player" | "-p" => {
                i += 1;
                if i < args.len() {
                    player = args[i].parse().unwrap_or(0);
                }
            }
            "--seeds" | "-s" => {
                i += 1;
                if i < args.len() {
                    seeds = args[i].parse().unwrap_or(8);
                }
            }
            "--output" | "-o" => {
                i += 1;
                if i < args.len() {
                    output_file = args[i].clone();
                }
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                return;
            }
        }
        i += 1;
    }

    println!("=== Approximate Best-Response Sweep (Kuhn Poker) ===");
    println!();

    let game = KuhnPoker::new();
    let uniform = UniformStrategy;

    // Exact value as the convergence target
    let exact_value = match exploitability(&game, player, &uniform, &BrConfig::default()) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Error computing exact value: {}", e);
            return;
        }
    };
    println!("Exact exploitability of uniform (player {}): {:.6}", player, exact_value);
    println!();

    // Build the (iterations, seed) grid and run the cells in parallel
    let cells: Vec<(u64, u64)> = ITERATION_GRID
        .iter()
        .flat_map(|&iters| (0..seeds).map(move |seed| (iters, seed)))
        .collect();

    let progress = ProgressBar::new(cells.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} cells ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let total_start = Instant::now();
    let results: Vec<SweepResult> = cells
        .par_iter()
        .filter_map(|&(iterations, seed)| {
            let config = BrConfig::default().with_seed(seed);
            let start = Instant::now();

            let result = approx_exploitability(&game, player, &uniform, iterations, &config)
                .ok()
                .map(|value| SweepResult {
                    iterations,
                    seed,
                    value,
                    abs_error: (value - exact_value).abs(),
                    elapsed_seconds: start.elapsed().as_secs_f64(),
                });

            progress.inc(1);
            result
        })
        .collect();
    progress.finish_and_clear();

    // Per-iteration-count summary
    println!("{:>10} {:>12} {:>12}", "iterations", "mean value", "mean |err|");
    for &iters in ITERATION_GRID.iter() {
        let cells: Vec<&SweepResult> = results.iter().filter(|r| r.iterations == iters).collect();
        if cells.is_empty() {
            continue;
        }
        let mean_value: f64 = cells.iter().map(|r| r.value).sum::<f64>() / cells.len() as f64;
        let mean_error: f64 = cells.iter().map(|r| r.abs_error).sum::<f64>() / cells.len() as f64;
        println!("{:>10} {:>12.4} {:>12.4}", iters, mean_value, mean_error);
    }
    println!();
    println!(
        "{} cells in {:.2}s",
        results.len(),
        total_start.elapsed().as_secs_f64()
    );

    let output = SweepOutput {
        measured_player: player,
        exact_value,
        results,
    };
    match serde_json::to_string_pretty(&output) {
        Ok(json) => match fs::write(&output_file, json) {
            Ok(()) => println!("Sweep written to {}", output_file),
            Err(e) => eprintln!("Error writing output: {}", e),
        },
        Err(e) => eprintln!("Error serializing output: {}", e),
    }
}

fn print_help() {
    println!("Approximate Best-Response Sweep");
    println!();
    println!("Usage: br_sweep [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --player, -p <N>   Measured player seat, 0 or 1 (default: 0)");
    println!("  --seeds, -s <N>    Seeds per iteration count (default: 8)");
    println!("  --output, -o <FILE> Output file (default: sweep.json)");
    println!("  --help, -h         Show this help");
}
