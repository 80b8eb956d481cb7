//! Run every built-in benchmark function and compare against its known minimum.

use std::time::Instant;

use imperialist_competitive::{BenchmarkFunction, IcaConfig, IcaEngine};

fn main() {
    println!("=== Benchmark Suite ===\n");

    for dimensions in [2, 10] {
        println!("Dimensions: {}", dimensions);

        for function in BenchmarkFunction::ALL {
            let config = IcaConfig {
                dimensions,
                max_iterations: 300,
                random_seed: Some(42),
                ..IcaConfig::default().with_bounds_of(function)
            };

            let start = Instant::now();
            let result = IcaEngine::initialize(config, function).and_then(|mut e| e.run());
            let elapsed = start.elapsed();

            match result {
                Ok(result) => {
                    let (_, minimum) = function.known_minimum(dimensions);
                    println!(
                        "  {:<10} best={:.4e}  error={:.4e}  evals={:>6}  empires={:>2}  {:.2}s",
                        function.name(),
                        result.best.cost,
                        (result.best.cost - minimum).abs(),
                        result.stats.evaluations,
                        result.stats.final_empire_count,
                        elapsed.as_secs_f64()
                    );
                }
                Err(e) => println!("  {:<10} failed: {}", function.name(), e),
            }
        }
        println!();
    }
}
