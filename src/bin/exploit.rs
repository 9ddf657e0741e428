//! Exploitability evaluation binary.
//!
//! Usage:
//!   cargo run --release --bin exploit -- [OPTIONS]
//!
//! Options:
//!   --game <NAME>        Game to evaluate: kuhn or mp (default: kuhn)
//!   --player <N>         Measured player seat, 0 or 1 (default: 0)
//!   --strategy <FILE>    Strategy under test as JSON (default: uniform)
//!   --approx             Use the sampling-based approximate path
//!   --iterations <N>     Training iterations for --approx (default: 100000)
//!   --max-nodes <N>      Node budget for the exact path
//!   --seed <N>           Random seed (optional)
//!   --output <FILE>      Output file (default: exploitability.json)

use std::env;
use std::fs;
use std::time::Instant;

use rustc_hash::FxHashMap;
use serde::Serialize;

use br_solver::br::{
    ApproxBestResponse, BestResponse, BrConfig, Game, Strategy, StrategyProfile, TabularStrategy,
    UniformStrategy,
};
use br_solver::games::kuhn::KuhnPoker;
use br_solver::games::matching_pennies::MatchingPennies;

/// Serializable evaluation result.
#[derive(Debug, Serialize)]
struct SolutionOutput {
    game: String,
    measured_player: usize,
    mode: String,
    value: f64,
    iterations: Option<u64>,
    nodes_visited: Option<u64>,
    info_sets: usize,
    elapsed_seconds: f64,
    policy: FxHashMap<String, Vec<f64>>,
}

struct Options {
    game: String,
    player: usize,
    strategy_file: Option<String>,
    approx: bool,
    iterations: u64,
    max_nodes: Option<u64>,
    seed: Option<u64>,
    output_file: String,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let mut opts = Options {
        game: "kuhn".to_string(),
        player: 0,
        strategy_file: None,
        approx: false,
        iterations: 100_000,
        max_nodes: None,
        seed: None,
        output_file: "exploitability.json".to_string(),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--game" | "-g" => {
                i += 1;
                if i < args.len() {
                    opts.game = args[i].clone();
                }
            }
            "--player" | "-p" => {
                i += 1;
                if i < args.len() {
                    opts.player = args[i].parse().unwrap_or(0);
                }
            }
            "--strategy" => {
                i += 1;
                if i < args.len() {
                    opts.strategy_file = Some(args[i].clone());
                }
            }
            "--approx" | "-a" => {
                opts.approx = true;
            }
            "--iterations" | "-i" => {
                i += 1;
                if i < args.len() {
                    opts.iterations = args[i].parse().unwrap_or(100_000);
                }
            }
            "--max-nodes" | "-n" => {
                i += 1;
                if i < args.len() {
                    opts.max_nodes = args[i].parse().ok();
                }
            }
            "--seed" | "-s" => {
                i += 1;
                if i < args.len() {
                    opts.seed = args[i].parse().ok();
                }
            }
            "--output" | "-o" => {
                i += 1;
                if i < args.len() {
                    opts.output_file = args[i].clone();
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

    println!("=================================================");
    println!("  Exploitability Evaluator");
    println!("=================================================");
    println!();

    match opts.game.as_str() {
        "kuhn" => run(&KuhnPoker::new(), &opts),
        "mp" => run(&MatchingPennies::new(), &opts),
        other => {
            eprintln!("Unknown game: {} (expected kuhn or mp)", other);
        }
    }
}

fn run<G: Game>(game: &G, opts: &Options) {
    if opts.player > 1 {
        eprintln!("Measured player must be 0 or 1, got {}", opts.player);
        return;
    }

    // Load or default the strategy under test
    let strategy: Box<dyn Strategy<G>> = match &opts.strategy_file {
        Some(path) => {
            println!("Loading strategy from: {}", path);
            let text = match fs::read_to_string(path) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("Error reading strategy file: {}", e);
                    return;
                }
            };
            match serde_json::from_str::<TabularStrategy>(&text) {
                Ok(tabular) => Box::new(tabular),
                Err(e) => {
                    eprintln!("Error parsing strategy file: {}", e);
                    return;
                }
            }
        }
        None => {
            println!("Using the uniform strategy");
            Box::new(UniformStrategy)
        }
    };

    let mut config = BrConfig::default();
    if let Some(max_nodes) = opts.max_nodes {
        config = config.with_max_nodes(max_nodes);
    }
    if let Some(seed) = opts.seed {
        config = config.with_seed(seed);
    }

    let responder = 1 - opts.player;
    let profile = StrategyProfile::with_responder(responder, &[strategy.as_ref()]);

    println!("Game: {}", opts.game);
    println!("Measured player: {}", opts.player);
    println!("Mode: {}", if opts.approx { "approximate" } else { "exact" });
    println!();

    let start = Instant::now();
    let output = if opts.approx {
        let mut br =
            match ApproxBestResponse::compute(game, responder, &profile, opts.iterations, &config)
            {
                Ok(br) => br,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return;
                }
            };

        let num_samples = config
            .value_samples
            .unwrap_or_else(|| (opts.iterations / 2) as usize);
        let value = match br.sample_value(&profile, num_samples) {
            Ok(value) => value,
            Err(e) => {
                eprintln!("Error: {}", e);
                return;
            }
        };

        SolutionOutput {
            game: opts.game.clone(),
            measured_player: opts.player,
            mode: "approx".to_string(),
            value,
            iterations: Some(opts.iterations),
            nodes_visited: None,
            info_sets: br.num_info_sets(),
            elapsed_seconds: start.elapsed().as_secs_f64(),
            policy: br.policy_map(),
        }
    } else {
        let br = match BestResponse::compute(game, responder, &profile, &config) {
            Ok(br) => br,
            Err(e) => {
                eprintln!("Error: {}", e);
                return;
            }
        };

        SolutionOutput {
            game: opts.game.clone(),
            measured_player: opts.player,
            mode: "exact".to_string(),
            value: br.value(),
            iterations: None,
            nodes_visited: Some(br.stats().nodes_visited),
            info_sets: br.stats().info_sets,
            elapsed_seconds: start.elapsed().as_secs_f64(),
            policy: br.policy_map().clone(),
        }
    };

    println!("Exploitability: {:.6}", output.value);
    println!("Info sets: {}", output.info_sets);
    if let Some(nodes) = output.nodes_visited {
        println!("Nodes visited: {}", nodes);
    }
    println!("Elapsed: {:.3}s", output.elapsed_seconds);

    match serde_json::to_string_pretty(&output) {
        Ok(json) => match fs::write(&opts.output_file, json) {
            Ok(()) => println!("Solution written to {}", opts.output_file),
            Err(e) => eprintln!("Error writing output: {}", e),
        },
        Err(e) => eprintln!("Error serializing output: {}", e),
    }
}

fn print_help() {
    println!("Exploitability Evaluator");
    println!();
    println!("Usage: exploit [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --game, -g <NAME>      Game to evaluate: kuhn or mp (default: kuhn)");
    println!("  --player, -p <N>       Measured player seat, 0 or 1 (default: 0)");
    println!("  --strategy <FILE>      Strategy under test as JSON (default: uniform)");
    println!("  --approx, -a           Use the sampling-based approximate path");
    println!("  --iterations, -i <N>   Training iterations for --approx (default: 100000)");
    println!("  --max-nodes, -n <N>    Node budget for the exact path");
    println!("  --seed, -s <N>         Random seed (optional)");
    println!("  --output, -o <FILE>    Output file (default: exploitability.json)");
    println!("  --help, -h             Show this help");
}
