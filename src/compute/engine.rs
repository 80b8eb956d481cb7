//! The ICA driver: owns the run state and applies the operators in order.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::schema::{
    BestCandidate, EmpireSummary, EnginePhase, IcaConfig, RunResult, RunStats, Snapshot,
    StopReason,
};

use super::assimilation::assimilate;
use super::competition::{compete, exchange_leadership};
use super::error::{IcaError, Result};
use super::init::initialize_empires;
use super::objective::Objective;
use super::population::{CandidateId, Empire, Population, SearchSpace};
use super::revolution::Revolution;
use super::unification::unify;

/// Explicit starting layout of one empire, used by [`IcaEngine::from_layout`].
#[derive(Debug, Clone, PartialEq)]
pub struct EmpireLayout {
    /// Leader position.
    pub leader: Vec<f64>,
    /// Colony positions.
    pub colonies: Vec<Vec<f64>>,
}

/// Imperialist Competitive Algorithm engine.
///
/// One [`step`](Self::step) runs assimilation, revolution, leadership
/// exchange, competition with collapse and unification, then updates the
/// global best and the convergence history. The random generator is owned
/// by the engine so a seeded run is fully reproducible.
pub struct IcaEngine<R: Rng = StdRng> {
    config: IcaConfig,
    space: SearchSpace,
    objective: Box<dyn Objective>,
    rng: R,
    population: Population,
    empires: Vec<Empire>,
    best: BestCandidate,
    history: Vec<f64>,
    iteration: usize,
    halted: bool,
    cancelled: Arc<AtomicBool>,
}

impl IcaEngine<StdRng> {
    /// Validate `config` and build the initial empires.
    ///
    /// The generator is seeded from `config.random_seed`, or from entropy
    /// when no seed is given.
    pub fn initialize(config: IcaConfig, objective: impl Objective + 'static) -> Result<Self> {
        config.validate()?;
        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, objective, rng)
    }
}

impl<R: Rng> IcaEngine<R> {
    /// Like [`IcaEngine::initialize`] with an injected generator.
    /// `config.random_seed` is ignored.
    pub fn with_rng(config: IcaConfig, objective: impl Objective + 'static, mut rng: R) -> Result<Self> {
        config.validate()?;
        let objective: Box<dyn Objective> = Box::new(objective);
        let (population, empires) = initialize_empires(&config, objective.as_ref(), &mut rng)?;
        Ok(Self::assemble(config, objective, rng, population, empires))
    }

    /// Start from explicit empires instead of a random draw.
    ///
    /// `population_size` and `leader_count` are taken from the layout; the
    /// remaining parameters come from `config`. Positions outside the bounds
    /// are clamped.
    pub fn from_layout(
        mut config: IcaConfig,
        objective: impl Objective + 'static,
        rng: R,
        layout: Vec<EmpireLayout>,
    ) -> Result<Self> {
        config.leader_count = layout.len();
        config.population_size = layout.iter().map(|e| e.colonies.len() + 1).sum();
        config.validate()?;

        let objective: Box<dyn Objective> = Box::new(objective);
        let mut population = Population::new();
        let mut empires = Vec::with_capacity(layout.len());
        for entry in layout {
            let mut insert = |position: Vec<f64>| -> Result<CandidateId> {
                if position.len() != config.dimensions {
                    return Err(IcaError::DimensionMismatch {
                        expected: config.dimensions,
                        got: position.len(),
                    });
                }
                let position = SearchSpace::from_config(&config).clamp(position);
                Ok(population.insert(position, objective.as_ref())?)
            };
            let mut empire = Empire::new(insert(entry.leader)?);
            for colony in entry.colonies {
                empire.add_colony(insert(colony)?);
            }
            empires.push(empire);
        }
        Ok(Self::assemble(config, objective, rng, population, empires))
    }

    fn assemble(
        config: IcaConfig,
        objective: Box<dyn Objective>,
        rng: R,
        population: Population,
        empires: Vec<Empire>,
    ) -> Self {
        let mut engine = Self {
            space: SearchSpace::from_config(&config),
            config,
            objective,
            rng,
            population,
            empires,
            best: BestCandidate {
                position: Vec::new(),
                cost: f64::INFINITY,
            },
            history: Vec::new(),
            iteration: 0,
            halted: false,
            cancelled: Arc::new(AtomicBool::new(false)),
        };
        engine.update_best();
        engine.history.push(engine.best.cost);

        info!(
            "Initialized {} candidates in {} empires ({}D, objective {}), best cost {:.6e}",
            engine.population.len(),
            engine.empires.len(),
            engine.config.dimensions,
            engine.objective.name(),
            engine.best.cost
        );
        engine
    }

    /// Advance exactly one iteration.
    ///
    /// An objective failure is returned immediately and halts the engine:
    /// every later call reports [`IcaError::Terminated`].
    pub fn step(&mut self) -> Result<()> {
        if self.is_terminated() {
            return Err(IcaError::Terminated {
                iterations: self.iteration,
            });
        }
        if let Err(err) = self.apply_operators() {
            self.halted = true;
            return Err(err);
        }

        self.update_best();
        self.history.push(self.best.cost);
        self.iteration += 1;

        trace!(
            "Iteration {}: best {:.6e}, {} empires",
            self.iteration,
            self.best.cost,
            self.empires.len()
        );
        if self.is_terminated() {
            info!(
                "Finished {} iterations: best cost {:.6e} at {:?}, {} empires, {} evaluations",
                self.iteration,
                self.best.cost,
                self.best.position,
                self.empires.len(),
                self.population.evaluations()
            );
        }
        Ok(())
    }

    fn apply_operators(&mut self) -> Result<()> {
        let objective = self.objective.as_ref();

        assimilate(
            &self.empires,
            &mut self.population,
            &self.space,
            self.config.assimilation_coefficient,
            objective,
            &mut self.rng,
        )?;

        let revolution = Revolution {
            rate: self.config.revolution_rate,
            magnitude: self.config.revolution_magnitude,
            include_leaders: self.config.revolve_leaders,
        };
        revolution.apply(
            &self.empires,
            &mut self.population,
            &self.space,
            objective,
            &mut self.rng,
        )?;

        let exchanges = exchange_leadership(&mut self.empires, &self.population);
        if exchanges > 0 {
            debug!("Iteration {}: {} leadership exchanges", self.iteration + 1, exchanges);
        }

        compete(
            &mut self.empires,
            &self.population,
            self.config.decay_rate,
            &mut self.rng,
        );

        let max_distance = self.config.unification_threshold * self.space.width();
        unify(&mut self.empires, &self.population, max_distance);
        Ok(())
    }

    /// Replace the global best only on strict improvement.
    fn update_best(&mut self) {
        if let Some((_, candidate)) = self.population.best()
            && candidate.cost() < self.best.cost
        {
            self.best = BestCandidate {
                position: candidate.position().to_vec(),
                cost: candidate.cost(),
            };
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> EnginePhase {
        if self.is_terminated() {
            EnginePhase::Terminated
        } else if self.iteration == 0 {
            EnginePhase::Initialized
        } else {
            EnginePhase::Running
        }
    }

    /// Whether the iteration budget is exhausted (or a step failed).
    pub fn is_terminated(&self) -> bool {
        self.halted || self.iteration >= self.config.max_iterations
    }

    /// Read-only view for external consumers.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            iteration: self.iteration,
            best_cost: self.best.cost,
            best_position: self.best.position.clone(),
            active_empire_count: self.empires.len(),
        }
    }

    /// Per-empire summaries, strongest first after the latest competition.
    pub fn empires(&self) -> Vec<EmpireSummary> {
        self.empires
            .iter()
            .map(|empire| EmpireSummary {
                leader_position: self.population[empire.leader()].position().to_vec(),
                leader_cost: self.population.cost(empire.leader()),
                colony_positions: empire
                    .colonies()
                    .iter()
                    .map(|&id| self.population[id].position().to_vec())
                    .collect(),
                empire_cost: empire.empire_cost(&self.population, self.config.decay_rate),
            })
            .collect()
    }

    /// Active empires.
    pub fn empire_states(&self) -> &[Empire] {
        &self.empires
    }

    /// Every candidate of the run.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Best candidate seen so far.
    pub fn best(&self) -> &BestCandidate {
        &self.best
    }

    /// Best cost after initialization and after each iteration.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Completed iterations.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Objective evaluations so far.
    pub fn evaluations(&self) -> u64 {
        self.population.evaluations()
    }

    /// Run configuration.
    pub fn config(&self) -> &IcaConfig {
        &self.config
    }

    /// Get cancellation handle, checked between iterations.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Step until termination or cancellation.
    ///
    /// The callback sees the initial state and the state after every step.
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> Result<RunResult>
    where
        F: FnMut(&Snapshot),
    {
        let start_time = std::time::Instant::now();
        callback(&self.snapshot());

        let stop_reason = loop {
            if self.cancelled.load(Ordering::Relaxed) {
                break StopReason::Cancelled;
            }
            if self.is_terminated() {
                break StopReason::MaxIterations;
            }
            self.step()?;
            callback(&self.snapshot());
        };

        Ok(RunResult {
            best: self.best.clone(),
            history: self.history.clone(),
            stats: RunStats {
                iterations: self.iteration,
                evaluations: self.population.evaluations(),
                final_empire_count: self.empires.len(),
                elapsed_seconds: start_time.elapsed().as_secs_f64(),
                stop_reason,
            },
        })
    }

    /// Run to completion (blocking).
    pub fn run(&mut self) -> Result<RunResult> {
        self.run_with_callback(|_| {})
    }
}
