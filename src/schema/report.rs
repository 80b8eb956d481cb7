//! Read-only views of a run, consumed by renderers, loggers and the CLI.

use serde::{Deserialize, Serialize};

/// Lifecycle of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnginePhase {
    /// Population built, no iteration performed yet.
    Initialized,
    /// At least one iteration performed, budget not exhausted.
    Running,
    /// Iteration budget exhausted.
    Terminated,
}

/// Best candidate observed so far (a copy, not a live reference).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestCandidate {
    /// Position in the search space.
    pub position: Vec<f64>,
    /// Objective value at `position`.
    pub cost: f64,
}

/// Per-iteration view handed to external collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Completed iterations.
    pub iteration: usize,
    /// Lowest cost seen during the run.
    pub best_cost: f64,
    /// Where `best_cost` was found.
    pub best_position: Vec<f64>,
    /// Number of surviving empires.
    pub active_empire_count: usize,
}

/// Summary of one empire, for drawing and diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmpireSummary {
    /// Leader position.
    pub leader_position: Vec<f64>,
    /// Leader cost.
    pub leader_cost: f64,
    /// Colony positions.
    pub colony_positions: Vec<Vec<f64>>,
    /// Aggregate cost used for competition ranking.
    pub empire_cost: f64,
}

impl EmpireSummary {
    /// Number of colonies owned by this empire.
    pub fn colony_count(&self) -> usize {
        self.colony_positions.len()
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Iteration budget exhausted.
    MaxIterations,
    /// Caller cancelled between iterations.
    Cancelled,
}

/// Statistics of a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    /// Completed iterations.
    pub iterations: usize,
    /// Objective evaluations, including initialization.
    pub evaluations: u64,
    /// Empires alive at the end.
    pub final_empire_count: usize,
    /// Wall clock time.
    pub elapsed_seconds: f64,
    /// Why the run ended.
    pub stop_reason: StopReason,
}

/// Result of running an engine to completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Best candidate of the run.
    pub best: BestCandidate,
    /// Best cost after initialization and after each iteration.
    pub history: Vec<f64>,
    /// Run statistics.
    pub stats: RunStats,
}
