//! Imperialist Competitive Algorithm - a population-based, gradient-free optimizer.
//!
//! Candidate solutions ("countries") are grouped into empires. Each
//! iteration colonies drift toward their leader, some revolt at random, the
//! best colony of an empire may take over, the weakest empire loses its
//! colonies to stronger ones and eventually collapses, and empires whose
//! leaders meet unite.
//!
//! # Architecture
//!
//! - `schema`: Configuration, benchmark objectives and report types
//! - `compute`: The engine and its operators
//!
//! # Example
//!
//! ```rust
//! use imperialist_competitive::{BenchmarkFunction, IcaConfig, IcaEngine};
//!
//! let config = IcaConfig {
//!     population_size: 60,
//!     leader_count: 6,
//!     max_iterations: 100,
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let mut engine = IcaEngine::initialize(config, BenchmarkFunction::Sphere)?;
//! while !engine.is_terminated() {
//!     engine.step()?;
//! }
//!
//! let snapshot = engine.snapshot();
//! println!(
//!     "Best cost {:.3e} at {:?} ({} empires left)",
//!     snapshot.best_cost, snapshot.best_position, snapshot.active_empire_count
//! );
//! # Ok::<(), imperialist_competitive::IcaError>(())
//! ```

pub mod compute;
pub mod schema;

// WebAssembly bindings (only for wasm32 target)
#[cfg(target_arch = "wasm32")]
pub mod wasm;

// Re-export commonly used types
pub use compute::{FnObjective, IcaEngine, IcaError, Objective, ObjectiveError};
pub use schema::{BenchmarkFunction, IcaConfig, RunConfig, Snapshot};
