//! Unification of empires whose leaders have converged on the same region.

use log::debug;

use super::population::{Empire, Population};

/// Merge empires whose leaders are closer than `max_distance`.
///
/// The empire with the higher leader cost is absorbed by the other (its
/// leader becomes a colony). The pair scan restarts after every merge, so
/// removals never shift an index that is still being visited. Returns the
/// number of merges.
pub fn unify(empires: &mut Vec<Empire>, population: &Population, max_distance: f64) -> usize {
    let mut merges = 0;
    while let Some((survivor, absorbed)) = find_close_pair(empires, population, max_distance) {
        let fallen = empires.remove(absorbed);
        let survivor = if absorbed < survivor {
            survivor - 1
        } else {
            survivor
        };
        debug!(
            "Empire led by candidate {} united into empire led by candidate {}",
            fallen.leader().index(),
            empires[survivor].leader().index()
        );
        empires[survivor].absorb(fallen);
        merges += 1;
    }
    merges
}

/// First pair `(stronger, weaker)` of empires with leaders within `max_distance`.
///
/// Ties in leader cost keep the earlier empire.
fn find_close_pair(
    empires: &[Empire],
    population: &Population,
    max_distance: f64,
) -> Option<(usize, usize)> {
    for i in 0..empires.len() {
        let a = &population[empires[i].leader()];
        for j in (i + 1)..empires.len() {
            let b = &population[empires[j].leader()];
            if euclidean_distance(a.position(), b.position()) < max_distance {
                return Some(if b.cost() < a.cost() { (j, i) } else { (i, j) });
            }
        }
    }
    None
}

/// Euclidean distance between two positions.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
