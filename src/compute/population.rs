//! Candidate arena and empire membership.
//!
//! All candidates live in one flat [`Population`] and never move. Empires
//! refer to them by [`CandidateId`], so role changes (leadership exchange,
//! redistribution, collapse, unification) only shuffle indices.

use std::ops::Index;

use rand::Rng;

use crate::schema::IcaConfig;

use super::objective::{Objective, ObjectiveError, evaluate_finite};

/// Added to normalization denominators so equal costs never divide by zero.
pub const POWER_EPSILON: f64 = 1e-9;

/// Stable index of a candidate within its [`Population`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidateId(usize);

impl CandidateId {
    /// Raw arena index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A point in the search space with its cached cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    position: Vec<f64>,
    cost: f64,
}

impl Candidate {
    /// Position in the search space.
    #[inline]
    pub fn position(&self) -> &[f64] {
        &self.position
    }

    /// Objective value at [`Self::position`].
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }
}

/// Axis-aligned hypercube `[min, max]^dimensions`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSpace {
    /// Lower bound on every axis.
    pub min: f64,
    /// Upper bound on every axis.
    pub max: f64,
    /// Number of axes.
    pub dimensions: usize,
}

impl SearchSpace {
    /// Search space described by a configuration.
    pub fn from_config(config: &IcaConfig) -> Self {
        Self {
            min: config.search_min,
            max: config.search_max,
            dimensions: config.dimensions,
        }
    }

    /// Domain width `max - min`.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Clamp every coordinate into bounds.
    pub fn clamp(&self, mut position: Vec<f64>) -> Vec<f64> {
        for x in &mut position {
            *x = x.clamp(self.min, self.max);
        }
        position
    }

    /// Whether every coordinate lies within bounds.
    pub fn contains(&self, position: &[f64]) -> bool {
        position.len() == self.dimensions && position.iter().all(|&x| x >= self.min && x <= self.max)
    }

    /// Uniform random point.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        (0..self.dimensions)
            .map(|_| rng.gen_range(self.min..=self.max))
            .collect()
    }
}

/// Flat storage of every candidate in a run.
#[derive(Debug, Clone, Default)]
pub struct Population {
    candidates: Vec<Candidate>,
    evaluations: u64,
}

impl Population {
    /// Create an empty population.
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate `position` and store it as a new candidate.
    pub fn insert(
        &mut self,
        position: Vec<f64>,
        objective: &dyn Objective,
    ) -> Result<CandidateId, ObjectiveError> {
        let cost = self.evaluate(objective, &position)?;
        self.candidates.push(Candidate { position, cost });
        Ok(CandidateId(self.candidates.len() - 1))
    }

    /// Move a candidate, recomputing its cost before either field changes.
    pub fn relocate(
        &mut self,
        id: CandidateId,
        position: Vec<f64>,
        objective: &dyn Objective,
    ) -> Result<(), ObjectiveError> {
        let cost = self.evaluate(objective, &position)?;
        let candidate = &mut self.candidates[id.0];
        candidate.position = position;
        candidate.cost = cost;
        Ok(())
    }

    fn evaluate(&mut self, objective: &dyn Objective, position: &[f64]) -> Result<f64, ObjectiveError> {
        self.evaluations += 1;
        evaluate_finite(objective, position)
    }

    /// Cost of a candidate.
    #[inline]
    pub fn cost(&self, id: CandidateId) -> f64 {
        self.candidates[id.0].cost
    }

    /// Number of candidates.
    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the population is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Objective evaluations performed so far.
    #[inline]
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Iterate over `(id, candidate)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (CandidateId, &Candidate)> {
        self.candidates
            .iter()
            .enumerate()
            .map(|(i, c)| (CandidateId(i), c))
    }

    /// Lowest-cost candidate.
    pub fn best(&self) -> Option<(CandidateId, &Candidate)> {
        self.iter().min_by(|a, b| a.1.cost.total_cmp(&b.1.cost))
    }
}

impl Index<CandidateId> for Population {
    type Output = Candidate;

    fn index(&self, id: CandidateId) -> &Candidate {
        &self.candidates[id.0]
    }
}

/// A leader plus the colonies it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct Empire {
    leader: CandidateId,
    colonies: Vec<CandidateId>,
}

impl Empire {
    /// Create an empire with no colonies.
    pub fn new(leader: CandidateId) -> Self {
        Self {
            leader,
            colonies: Vec::new(),
        }
    }

    /// Current leader.
    #[inline]
    pub fn leader(&self) -> CandidateId {
        self.leader
    }

    /// Owned colonies.
    #[inline]
    pub fn colonies(&self) -> &[CandidateId] {
        &self.colonies
    }

    /// Leader plus colonies.
    pub fn members(&self) -> impl Iterator<Item = CandidateId> + '_ {
        std::iter::once(self.leader).chain(self.colonies.iter().copied())
    }

    /// Leader plus colony count.
    #[inline]
    pub fn size(&self) -> usize {
        self.colonies.len() + 1
    }

    /// Take ownership of a colony.
    pub fn add_colony(&mut self, id: CandidateId) {
        debug_assert_ne!(id, self.leader);
        self.colonies.push(id);
    }

    /// Remove and return every colony.
    pub fn take_colonies(&mut self) -> Vec<CandidateId> {
        std::mem::take(&mut self.colonies)
    }

    /// Absorb another empire: its colonies and its demoted leader.
    pub fn absorb(&mut self, other: Empire) {
        self.colonies.push(other.leader);
        self.colonies.extend(other.colonies);
    }

    /// Leader cost plus `decay_rate` times the mean colony cost (0 without colonies).
    pub fn empire_cost(&self, population: &Population, decay_rate: f64) -> f64 {
        let leader_cost = population.cost(self.leader);
        if self.colonies.is_empty() {
            return leader_cost;
        }
        let mean = self.colonies.iter().map(|&id| population.cost(id)).sum::<f64>()
            / self.colonies.len() as f64;
        leader_cost + decay_rate * mean
    }

    /// Promote the best colony if it is strictly better than the leader.
    ///
    /// The old leader takes the promoted colony's slot. Returns whether a
    /// swap happened.
    pub fn exchange_leadership(&mut self, population: &Population) -> bool {
        let best = self
            .colonies
            .iter()
            .enumerate()
            .min_by(|a, b| population.cost(*a.1).total_cmp(&population.cost(*b.1)));

        match best {
            Some((slot, &colony)) if population.cost(colony) < population.cost(self.leader) => {
                self.colonies[slot] = self.leader;
                self.leader = colony;
                true
            }
            _ => false,
        }
    }
}

/// Normalized power of each cost: `(max - c) / (max - min + eps)`.
///
/// The worst cost gets power 0; when every cost is equal all powers are 0.
pub fn normalized_power(costs: &[f64]) -> Vec<f64> {
    let max = costs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = costs.iter().copied().fold(f64::INFINITY, f64::min);
    let denominator = max - min + POWER_EPSILON;
    costs.iter().map(|&c| (max - c) / denominator).collect()
}

/// Roulette selection over non-negative weights.
///
/// Returns `None` when the total weight is not positive or rounding leaves
/// the draw past the last cumulative weight.
pub fn roulette_select<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return None;
    }
    let target = rng.gen_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &weight) in weights.iter().enumerate() {
        cumulative += weight;
        if target <= cumulative {
            return Some(i);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::BenchmarkFunction;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn population_with(positions: &[f64]) -> (Population, Vec<CandidateId>) {
        let mut population = Population::new();
        let ids = positions
            .iter()
            .map(|&x| population.insert(vec![x], &BenchmarkFunction::Sphere).unwrap())
            .collect();
        (population, ids)
    }

    #[test]
    fn test_relocate_updates_cost() {
        let (mut population, ids) = population_with(&[2.0]);
        assert_eq!(population.cost(ids[0]), 4.0);

        population
            .relocate(ids[0], vec![3.0], &BenchmarkFunction::Sphere)
            .unwrap();
        assert_eq!(population[ids[0]].position(), &[3.0]);
        assert_eq!(population.cost(ids[0]), 9.0);
        assert_eq!(population.evaluations(), 2);
    }

    #[test]
    fn test_relocate_failure_leaves_candidate_untouched() {
        let (mut population, ids) = population_with(&[2.0]);
        let failing = crate::compute::FnObjective::new("nan", |_: &[f64]| f64::NAN);
        assert!(population.relocate(ids[0], vec![5.0], &failing).is_err());
        assert_eq!(population[ids[0]].position(), &[2.0]);
        assert_eq!(population.cost(ids[0]), 4.0);
    }

    #[test]
    fn test_search_space() {
        let space = SearchSpace {
            min: -1.0,
            max: 1.0,
            dimensions: 3,
        };
        assert_eq!(space.width(), 2.0);
        assert_eq!(space.clamp(vec![-5.0, 0.5, 7.0]), vec![-1.0, 0.5, 1.0]);

        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert!(space.contains(&space.sample(&mut rng)));
        }
        assert!(!space.contains(&[0.0, 0.0]));
    }

    #[test]
    fn test_empire_cost() {
        let (population, ids) = population_with(&[1.0, 2.0, 4.0]);
        let mut empire = Empire::new(ids[0]);
        assert_eq!(empire.empire_cost(&population, 0.5), 1.0);

        empire.add_colony(ids[1]);
        empire.add_colony(ids[2]);
        // 1 + 0.5 * (4 + 16) / 2
        assert!((empire.empire_cost(&population, 0.5) - 6.0).abs() < 1e-12);
        assert_eq!(empire.size(), 3);
    }

    #[test]
    fn test_exchange_leadership() {
        let (population, ids) = population_with(&[3.0, 2.0, 1.0]);
        let mut empire = Empire::new(ids[0]);
        empire.add_colony(ids[1]);
        empire.add_colony(ids[2]);

        assert!(empire.exchange_leadership(&population));
        assert_eq!(empire.leader(), ids[2]);
        assert_eq!(empire.colonies(), &[ids[1], ids[0]]);

        assert!(!empire.exchange_leadership(&population));
    }

    #[test]
    fn test_exchange_leadership_keeps_leader_on_tie() {
        let (population, ids) = population_with(&[2.0, -2.0]);
        let mut empire = Empire::new(ids[0]);
        empire.add_colony(ids[1]);

        assert!(!empire.exchange_leadership(&population));
        assert_eq!(empire.leader(), ids[0]);
    }

    #[test]
    fn test_absorb() {
        let (population, ids) = population_with(&[0.0, 1.0, 2.0, 3.0]);
        let mut strong = Empire::new(ids[0]);
        strong.add_colony(ids[1]);
        let mut weak = Empire::new(ids[2]);
        weak.add_colony(ids[3]);

        strong.absorb(weak);
        assert_eq!(strong.colonies(), &[ids[1], ids[2], ids[3]]);
        assert_eq!(strong.members().count(), population.len());
    }

    #[test]
    fn test_normalized_power() {
        let power = normalized_power(&[1.0, 2.0, 3.0]);
        assert!((power[0] - 1.0).abs() < 1e-6);
        assert!((power[1] - 0.5).abs() < 1e-6);
        assert_eq!(power[2], 0.0);

        let flat = normalized_power(&[5.0, 5.0, 5.0]);
        assert!(flat.iter().all(|&p| p == 0.0));
    }

    #[test]
    fn test_roulette_select() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(roulette_select(&[0.0, 0.0], &mut rng), None);
        assert_eq!(roulette_select(&[], &mut rng), None);

        let mut counts = [0usize; 3];
        for _ in 0..3000 {
            counts[roulette_select(&[1.0, 0.0, 2.0], &mut rng).unwrap()] += 1;
        }
        assert_eq!(counts[1], 0);
        assert!(counts[2] > counts[0]);
    }
}
