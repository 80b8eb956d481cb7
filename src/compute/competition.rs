//! Leadership exchange and imperialistic competition.

use log::debug;
use rand::Rng;

use super::population::{Empire, Population, normalized_power, roulette_select};

/// Promote, in every empire, a colony that beats its leader.
///
/// Returns the number of empires whose leader changed.
pub fn exchange_leadership(empires: &mut [Empire], population: &Population) -> usize {
    empires
        .iter_mut()
        .map(|empire| empire.exchange_leadership(population))
        .filter(|&swapped| swapped)
        .count()
}

/// What one competition round did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompetitionOutcome {
    /// Colonies taken from the weakest empire and re-drawn.
    pub redistributed: usize,
    /// Colonies that landed in a different empire.
    pub transferred: usize,
    /// Whether the weakest empire collapsed into the strongest.
    pub collapsed: bool,
}

/// Run one round of imperialistic competition.
///
/// Empires are sorted ascending by empire cost, so afterwards index 0 is the
/// strongest. Every colony of the weakest empire is re-drawn by roulette over
/// the normalized leader power of all empires, falling back to the strongest
/// when the draw fails or all leaders are tied. A weakest empire left without
/// colonies collapses: its leader becomes a colony of the strongest.
///
/// Does nothing and returns `None` with fewer than two empires.
pub fn compete<R: Rng + ?Sized>(
    empires: &mut Vec<Empire>,
    population: &Population,
    decay_rate: f64,
    rng: &mut R,
) -> Option<CompetitionOutcome> {
    if empires.len() < 2 {
        return None;
    }

    let mut ranked: Vec<(f64, Empire)> = empires
        .drain(..)
        .map(|empire| (empire.empire_cost(population, decay_rate), empire))
        .collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    empires.extend(ranked.into_iter().map(|(_, empire)| empire));

    let leader_costs: Vec<f64> = empires.iter().map(|e| population.cost(e.leader())).collect();
    let powers = normalized_power(&leader_costs);

    let weakest = empires.len() - 1;
    let colonies = empires[weakest].take_colonies();
    let redistributed = colonies.len();
    let mut transferred = 0;
    for colony in colonies {
        let destination = roulette_select(&powers, rng).unwrap_or(0);
        if destination != weakest {
            transferred += 1;
        }
        empires[destination].add_colony(colony);
    }

    let collapsed = empires[weakest].colonies().is_empty();
    if collapsed {
        let fallen = empires.remove(weakest);
        debug!(
            "Empire led by candidate {} collapsed, {} empires remain",
            fallen.leader().index(),
            empires.len()
        );
        empires[0].absorb(fallen);
    }

    Some(CompetitionOutcome {
        redistributed,
        transferred,
        collapsed,
    })
}
