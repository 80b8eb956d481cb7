//! Initial population and colony assignment.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::schema::IcaConfig;

use super::error::Result;
use super::objective::Objective;
use super::population::{CandidateId, Empire, Population, SearchSpace, normalized_power};

/// Draw the initial population and split it into empires.
///
/// The `leader_count` cheapest candidates become leaders, strongest first.
/// The rest are shuffled and dealt out in proportion to leader power.
/// `config` must already be validated.
pub fn initialize_empires<R: Rng + ?Sized>(
    config: &IcaConfig,
    objective: &dyn Objective,
    rng: &mut R,
) -> Result<(Population, Vec<Empire>)> {
    let space = SearchSpace::from_config(config);

    let mut population = Population::new();
    let mut ranked = Vec::with_capacity(config.population_size);
    for _ in 0..config.population_size {
        ranked.push(population.insert(space.sample(rng), objective)?);
    }
    ranked.sort_by(|&a, &b| population.cost(a).total_cmp(&population.cost(b)));

    let mut colonies = ranked.split_off(config.leader_count);
    colonies.shuffle(rng);

    let mut empires: Vec<Empire> = ranked.into_iter().map(Empire::new).collect();
    let leader_costs: Vec<f64> = empires
        .iter()
        .map(|e| population.cost(e.leader()))
        .collect();
    assign_colonies(&mut empires, colonies, &normalized_power(&leader_costs));

    Ok((population, empires))
}

/// Deal colonies to empires ranked strongest first.
///
/// Empire `i` receives `round(power_i / total * colonies)` colonies, capped by
/// what is left. Rounding leftovers go to the strongest empire. If the total
/// power is not positive (all leaders tied) every empire gets an equal share.
pub fn assign_colonies(empires: &mut [Empire], colonies: Vec<CandidateId>, powers: &[f64]) {
    if empires.is_empty() {
        return;
    }

    let total: f64 = powers.iter().sum();
    let shares: Vec<f64> = if total > 0.0 && total.is_finite() {
        powers.iter().map(|p| p / total).collect()
    } else {
        vec![1.0 / empires.len() as f64; empires.len()]
    };

    let count = colonies.len() as f64;
    let mut remaining = colonies.into_iter();
    for (empire, share) in empires.iter_mut().zip(shares) {
        let quota = (share * count).round() as usize;
        for id in remaining.by_ref().take(quota) {
            empire.add_colony(id);
        }
    }
    for id in remaining {
        empires[0].add_colony(id);
    }
}
