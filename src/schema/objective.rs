//! Built-in benchmark objectives selectable by name.

use std::f64::consts::{E, PI};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Standard test functions for minimization, generalized to N dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenchmarkFunction {
    /// Sum of squares. Unimodal, minimum 0 at the origin.
    #[default]
    Sphere,
    /// Rastrigin with A = 10. Highly multimodal, minimum 0 at the origin.
    Rastrigin,
    /// Rosenbrock valley. Minimum 0 at (1, ..., 1).
    Rosenbrock,
    /// Ackley. Multimodal with a deep central funnel, minimum 0 at the origin.
    Ackley,
    /// Griewank. Minimum 0 at the origin.
    Griewank,
}

impl BenchmarkFunction {
    /// All built-in functions.
    pub const ALL: [BenchmarkFunction; 5] = [
        Self::Sphere,
        Self::Rastrigin,
        Self::Rosenbrock,
        Self::Ackley,
        Self::Griewank,
    ];

    /// Lower-case name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sphere => "sphere",
            Self::Rastrigin => "rastrigin",
            Self::Rosenbrock => "rosenbrock",
            Self::Ackley => "ackley",
            Self::Griewank => "griewank",
        }
    }

    /// Evaluate the function at `x`.
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        match self {
            Self::Sphere => x.iter().map(|xi| xi * xi).sum(),
            Self::Rastrigin => {
                const A: f64 = 10.0;
                A * x.len() as f64
                    + x
                        .iter()
                        .map(|&xi| xi * xi - A * (2.0 * PI * xi).cos())
                        .sum::<f64>()
            }
            Self::Rosenbrock => x
                .windows(2)
                .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (1.0 - w[0]).powi(2))
                .sum(),
            Self::Ackley => {
                if x.is_empty() {
                    return 0.0;
                }
                let n = x.len() as f64;
                let sum_sq: f64 = x.iter().map(|xi| xi * xi).sum();
                let sum_cos: f64 = x.iter().map(|&xi| (2.0 * PI * xi).cos()).sum();
                -20.0 * (-0.2 * (sum_sq / n).sqrt()).exp() - (sum_cos / n).exp() + 20.0 + E
            }
            Self::Griewank => {
                let sum: f64 = x.iter().map(|xi| xi * xi).sum::<f64>() / 4000.0;
                let prod: f64 = x
                    .iter()
                    .enumerate()
                    .map(|(i, &xi)| (xi / ((i + 1) as f64).sqrt()).cos())
                    .product();
                1.0 + sum - prod
            }
        }
    }

    /// Search bounds commonly used for this function.
    pub fn suggested_bounds(&self) -> (f64, f64) {
        match self {
            Self::Sphere => (-400.0, 400.0),
            Self::Rastrigin => (-200.0, 200.0),
            Self::Rosenbrock => (-200.0, 200.0),
            Self::Ackley => (-32.768, 32.768),
            Self::Griewank => (-600.0, 600.0),
        }
    }

    /// Location and value of the global minimum in `dimensions` dimensions.
    pub fn known_minimum(&self, dimensions: usize) -> (Vec<f64>, f64) {
        let coordinate = match self {
            Self::Rosenbrock => 1.0,
            _ => 0.0,
        };
        (vec![coordinate; dimensions], 0.0)
    }
}

impl fmt::Display for BenchmarkFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BenchmarkFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|function| function.name() == name)
            .ok_or_else(|| format!("unknown objective function: {s}"))
    }
}
