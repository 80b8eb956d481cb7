//! Assimilation: colonies drift toward their leader.

use rand::Rng;

use super::error::Result;
use super::objective::Objective;
use super::population::{Empire, Population, SearchSpace};

/// Move every colony toward its leader.
///
/// Per colony and per axis: `x += U(0,1) * beta * (leader - x)`, then clamp
/// and re-evaluate. Leaders never move.
pub fn assimilate<R: Rng + ?Sized>(
    empires: &[Empire],
    population: &mut Population,
    space: &SearchSpace,
    beta: f64,
    objective: &dyn Objective,
    rng: &mut R,
) -> Result<()> {
    for empire in empires {
        let leader = population[empire.leader()].position().to_vec();
        for &colony in empire.colonies() {
            let position: Vec<f64> = population[colony]
                .position()
                .iter()
                .zip(&leader)
                .map(|(&x, &target)| x + rng.r#gen::<f64>() * beta * (target - x))
                .collect();
            population.relocate(colony, space.clamp(position), objective)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::BenchmarkFunction;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const SPACE: SearchSpace = SearchSpace {
        min: -10.0,
        max: 10.0,
        dimensions: 2,
    };

    #[test]
    fn test_colonies_approach_leader() {
        let objective = BenchmarkFunction::Sphere;
        let mut population = Population::new();
        let leader = population.insert(vec![1.0, 1.0], &objective).unwrap();
        let colony = population.insert(vec![9.0, -7.0], &objective).unwrap();
        let mut empire = Empire::new(leader);
        empire.add_colony(colony);

        let mut rng = StdRng::seed_from_u64(5);
        let before = distance(population[colony].position(), &[1.0, 1.0]);
        // beta <= 1 never overshoots
        assimilate(&[empire], &mut population, &SPACE, 1.0, &objective, &mut rng).unwrap();
        let after = distance(population[colony].position(), &[1.0, 1.0]);

        assert!(after <= before);
        assert_eq!(population[leader].position(), &[1.0, 1.0]);
        let expected = objective.evaluate(population[colony].position());
        assert_eq!(population.cost(colony), expected);
    }

    #[test]
    fn test_overshoot_is_clamped() {
        let objective = BenchmarkFunction::Sphere;
        let mut population = Population::new();
        let leader = population.insert(vec![10.0, -10.0], &objective).unwrap();
        let mut empire = Empire::new(leader);
        for _ in 0..20 {
            let colony = population.insert(vec![-10.0, 10.0], &objective).unwrap();
            empire.add_colony(colony);
        }

        let mut rng = StdRng::seed_from_u64(11);
        let empires = [empire];
        for _ in 0..10 {
            assimilate(&empires, &mut population, &SPACE, 3.0, &objective, &mut rng).unwrap();
        }
        for (_, candidate) in population.iter() {
            assert!(SPACE.contains(candidate.position()));
        }
    }

    fn distance(a: &[f64], b: &[f64]) -> f64 {
        a.iter()
            .zip(b)
            .map(|(x, y)| (x - y).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}
