//! Revolution: random jumps that keep the population exploring.

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use super::error::Result;
use super::objective::Objective;
use super::population::{CandidateId, Empire, Population, SearchSpace};

/// Revolution parameters for one pass.
#[derive(Debug, Clone, Copy)]
pub struct Revolution {
    /// Per-candidate probability of a revolution.
    pub rate: f64,
    /// Step bound as a fraction of the domain width.
    pub magnitude: f64,
    /// Also perturb leaders.
    pub include_leaders: bool,
}

impl Revolution {
    /// Perturb candidates independently with probability `rate`.
    ///
    /// A perturbed candidate moves by `U(-m*W, m*W)` on every axis, where
    /// `W` is the domain width, then is clamped and re-evaluated.
    /// Returns how many candidates revolted.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        empires: &[Empire],
        population: &mut Population,
        space: &SearchSpace,
        objective: &dyn Objective,
        rng: &mut R,
    ) -> Result<usize> {
        let reach = self.magnitude * space.width();
        let step = Uniform::new_inclusive(-reach, reach);
        let mut revolted = 0;

        for empire in empires {
            let leader = self.include_leaders.then_some(empire.leader());
            for id in leader.into_iter().chain(empire.colonies().iter().copied()) {
                if rng.gen_bool(self.rate) {
                    perturb(id, population, space, objective, &step, rng)?;
                    revolted += 1;
                }
            }
        }
        Ok(revolted)
    }
}

fn perturb<R: Rng + ?Sized>(
    id: CandidateId,
    population: &mut Population,
    space: &SearchSpace,
    objective: &dyn Objective,
    step: &Uniform<f64>,
    rng: &mut R,
) -> Result<()> {
    let position: Vec<f64> = population[id]
        .position()
        .iter()
        .map(|&x| x + step.sample(rng))
        .collect();
    population.relocate(id, space.clamp(position), objective)?;
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

    fn empire_of(population: &mut Population, size: usize) -> Empire {
        let objective = BenchmarkFunction::Sphere;
        let leader = population.insert(vec![0.0, 0.0], &objective).unwrap();
        let mut empire = Empire::new(leader);
        for _ in 1..size {
            empire.add_colony(population.insert(vec![5.0, 5.0], &objective).unwrap());
        }
        empire
    }

    #[test]
    fn test_zero_rate_is_noop() {
        let mut population = Population::new();
        let empires = [empire_of(&mut population, 10)];
        let before = population.clone();

        let revolution = Revolution {
            rate: 0.0,
            magnitude: 0.5,
            include_leaders: true,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let revolted = revolution
            .apply(&empires, &mut population, &SPACE, &BenchmarkFunction::Sphere, &mut rng)
            .unwrap();

        assert_eq!(revolted, 0);
        for ((_, a), (_, b)) in population.iter().zip(before.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_leaders_untouched_by_default() {
        let mut population = Population::new();
        let empires = [empire_of(&mut population, 10)];
        let leader = empires[0].leader();

        let revolution = Revolution {
            rate: 1.0,
            magnitude: 0.3,
            include_leaders: false,
        };
        let mut rng = StdRng::seed_from_u64(2);
        let revolted = revolution
            .apply(&empires, &mut population, &SPACE, &BenchmarkFunction::Sphere, &mut rng)
            .unwrap();

        assert_eq!(revolted, 9);
        assert_eq!(population[leader].position(), &[0.0, 0.0]);
    }

    #[test]
    fn test_step_bounded_and_clamped() {
        let mut population = Population::new();
        let empires = [empire_of(&mut population, 50)];

        let revolution = Revolution {
            rate: 1.0,
            magnitude: 0.1,
            include_leaders: true,
        };
        let mut rng = StdRng::seed_from_u64(3);
        revolution
            .apply(&empires, &mut population, &SPACE, &BenchmarkFunction::Sphere, &mut rng)
            .unwrap();

        for &colony in empires[0].colonies() {
            let position = population[colony].position();
            assert!(SPACE.contains(position));
            // max reach is 0.1 * 20 = 2
            assert!(position.iter().all(|&x| (x - 5.0).abs() <= 2.0 + 1e-12));
        }
        assert_ne!(population[empires[0].leader()].position(), &[0.0, 0.0]);
    }
}
