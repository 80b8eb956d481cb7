//! Watch a 2D sphere run converge, one iteration at a time.

use imperialist_competitive::{BenchmarkFunction, IcaConfig, IcaEngine};

fn main() {
    env_logger::init();

    println!("=== Sphere Convergence ===\n");

    let config = IcaConfig {
        population_size: 30,
        leader_count: 3,
        dimensions: 2,
        max_iterations: 60,
        random_seed: Some(42),
        ..Default::default()
    };

    let mut engine = match IcaEngine::initialize(config, BenchmarkFunction::Sphere) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    while !engine.is_terminated() {
        if let Err(e) = engine.step() {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        let snapshot = engine.snapshot();
        if snapshot.iteration % 5 == 0 {
            println!(
                "  Iteration {:>3}: best={:.3e} at ({:+.4}, {:+.4}), empires={}",
                snapshot.iteration,
                snapshot.best_cost,
                snapshot.best_position[0],
                snapshot.best_position[1],
                snapshot.active_empire_count
            );
        }
    }

    println!();
    for (i, empire) in engine.empires().iter().enumerate() {
        println!(
            "  Empire {}: leader cost {:.3e}, {} colonies, total cost {:.3e}",
            i,
            empire.leader_cost,
            empire.colony_count(),
            empire.empire_cost
        );
    }
}
