//! ICA CLI - Minimize a benchmark function from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::path::Path;
use std::time::Instant;

use imperialist_competitive::{
    BenchmarkFunction, IcaConfig, IcaEngine, RunConfig,
    schema::{RunResult, StopReason},
};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let run = match args[1].as_str() {
        "--example" => {
            print_example_config();
            return;
        }
        "--objective" => run_config_from_flags(&args[2..]),
        path => load_run_config(Path::new(path)),
    };

    let config = &run.ica;
    println!("Imperialist Competitive Algorithm");
    println!("=================================");
    println!("Objective: {}", run.objective);
    println!(
        "Population: {} ({} empires), {}D in [{}, {}]",
        config.population_size,
        config.leader_count,
        config.dimensions,
        config.search_min,
        config.search_max
    );
    println!(
        "beta={} revolution={}x{} decay={} unification={}",
        config.assimilation_coefficient,
        config.revolution_rate,
        config.revolution_magnitude,
        config.decay_rate,
        config.unification_threshold
    );
    println!("Iterations: {}", config.max_iterations);
    if let Some(seed) = config.random_seed {
        println!("Seed: {}", seed);
    }
    println!();

    let max_iterations = config.max_iterations;
    let (_, known_minimum) = run.objective.known_minimum(config.dimensions);

    let mut engine = IcaEngine::initialize(run.ica.clone(), run.objective).unwrap_or_else(|e| {
        eprintln!("Error initializing optimizer: {}", e);
        std::process::exit(1);
    });

    println!("Running...");
    let start = Instant::now();
    let interval = (max_iterations / 10).max(1);

    let result = engine
        .run_with_callback(|snapshot| {
            let i = snapshot.iteration;
            if i > 0 && (i % interval == 0 || i == max_iterations) {
                let elapsed = start.elapsed().as_secs_f32();
                println!(
                    "  Iteration {}/{}: best={:.6e}, empires={}, {:.1} it/s",
                    i,
                    max_iterations,
                    snapshot.best_cost,
                    snapshot.active_empire_count,
                    i as f32 / elapsed
                );
            }
        })
        .unwrap_or_else(|e| {
            eprintln!("Error during optimization: {}", e);
            std::process::exit(1);
        });

    print_result(&result, known_minimum);
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <run.json>", program);
    eprintln!("       {} --objective <name> [--seed N]", program);
    eprintln!("       {} --example", program);
    eprintln!();
    eprintln!("Minimize a benchmark function with the imperialist competitive algorithm.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  run.json     Path to run configuration file");
    eprintln!("  --objective  Run a built-in function with default parameters");
    eprintln!("  --seed       Random seed for a reproducible run");
    eprintln!();
    let names: Vec<&str> = BenchmarkFunction::ALL.iter().map(|f| f.name()).collect();
    eprintln!("Objectives: {}", names.join(", "));
}

fn load_run_config(path: &Path) -> RunConfig {
    let config_str = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    })
}

fn run_config_from_flags(flags: &[String]) -> RunConfig {
    let Some(name) = flags.first() else {
        eprintln!("Missing objective name after --objective");
        std::process::exit(1);
    };
    let objective: BenchmarkFunction = name.parse().unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    });

    let mut ica = IcaConfig::default().with_bounds_of(objective);
    if let Some(flag) = flags.get(1) {
        if flag != "--seed" {
            eprintln!("Unknown argument: {}", flag);
            std::process::exit(1);
        }
        let seed = flags.get(2).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
            eprintln!("--seed requires an unsigned integer");
            std::process::exit(1);
        });
        ica.random_seed = Some(seed);
    }

    RunConfig { ica, objective }
}

fn print_result(result: &RunResult, known_minimum: f64) {
    let stats = &result.stats;

    println!();
    println!("Result:");
    println!("  Best cost: {:.6e}", result.best.cost);
    println!("  Known minimum: {}", known_minimum);
    println!("  Error: {:.6e}", (result.best.cost - known_minimum).abs());
    let position: Vec<String> = result
        .best
        .position
        .iter()
        .map(|x| format!("{:.6}", x))
        .collect();
    println!("  Position: [{}]", position.join(", "));
    println!();
    println!(
        "Stopped after {} iterations ({}), {} empires remain",
        stats.iterations,
        match stats.stop_reason {
            StopReason::MaxIterations => "iteration cap",
            StopReason::Cancelled => "cancelled",
        },
        stats.final_empire_count
    );
    println!(
        "Evaluations: {} in {:.2}s ({:.0} evals/s)",
        stats.evaluations,
        stats.elapsed_seconds,
        stats.evaluations as f64 / stats.elapsed_seconds.max(1e-9)
    );
}

fn print_example_config() {
    let objective = BenchmarkFunction::Rastrigin;
    let example = RunConfig {
        ica: IcaConfig {
            random_seed: Some(42),
            ..IcaConfig::default().with_bounds_of(objective)
        },
        objective,
    };

    match serde_json::to_string_pretty(&example) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing example: {}", e);
            std::process::exit(1);
        }
    }
}
