//! Configuration types for Imperialist Competitive Algorithm runs.

use serde::{Deserialize, Serialize};

use super::BenchmarkFunction;

/// Widest accepted search domain. Uniform draws over the domain and
/// revolution steps of up to twice its width must stay finite.
pub const MAX_DOMAIN_WIDTH: f64 = f64::MAX / 4.0;

fn default_population_size() -> usize {
    100
}
fn default_leader_count() -> usize {
    10
}
fn default_dimensions() -> usize {
    2
}
fn default_search_min() -> f64 {
    -10.0
}
fn default_search_max() -> f64 {
    10.0
}
fn default_assimilation_coefficient() -> f64 {
    1.5
}
fn default_revolution_rate() -> f64 {
    0.05
}
fn default_revolution_magnitude() -> f64 {
    0.1
}
fn default_decay_rate() -> f64 {
    0.1
}
fn default_unification_threshold() -> f64 {
    0.02
}
fn default_max_iterations() -> usize {
    200
}

/// Numeric parameters of an optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IcaConfig {
    /// Total number of candidates (leaders + colonies).
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Number of initial empires.
    #[serde(default = "default_leader_count")]
    pub leader_count: usize,
    /// Dimensionality of the search space.
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,
    /// Lower bound shared by every coordinate.
    #[serde(default = "default_search_min")]
    pub search_min: f64,
    /// Upper bound shared by every coordinate.
    #[serde(default = "default_search_max")]
    pub search_max: f64,
    /// Assimilation coefficient (beta): how far colonies move toward their leader.
    #[serde(default = "default_assimilation_coefficient")]
    pub assimilation_coefficient: f64,
    /// Probability that a candidate undergoes revolution in one iteration.
    #[serde(default = "default_revolution_rate")]
    pub revolution_rate: f64,
    /// Revolution step as a fraction of the domain width.
    #[serde(default = "default_revolution_magnitude")]
    pub revolution_magnitude: f64,
    /// Weight of the mean colony cost in the empire cost (xi).
    #[serde(default = "default_decay_rate")]
    pub decay_rate: f64,
    /// Leader distance, as a fraction of the domain width, under which empires unite.
    #[serde(default = "default_unification_threshold")]
    pub unification_threshold: f64,
    /// Iteration budget.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Apply revolution to empire leaders as well as colonies.
    #[serde(default)]
    pub revolve_leaders: bool,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for IcaConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            leader_count: default_leader_count(),
            dimensions: default_dimensions(),
            search_min: default_search_min(),
            search_max: default_search_max(),
            assimilation_coefficient: default_assimilation_coefficient(),
            revolution_rate: default_revolution_rate(),
            revolution_magnitude: default_revolution_magnitude(),
            decay_rate: default_decay_rate(),
            unification_threshold: default_unification_threshold(),
            max_iterations: default_max_iterations(),
            revolve_leaders: false,
            random_seed: None,
        }
    }
}

impl IcaConfig {
    /// Width of the search domain along every axis.
    #[inline]
    pub fn domain_width(&self) -> f64 {
        self.search_max - self.search_min
    }

    /// Use the bounds suggested by a benchmark function.
    pub fn with_bounds_of(mut self, function: BenchmarkFunction) -> Self {
        let (min, max) = function.suggested_bounds();
        self.search_min = min;
        self.search_max = max;
        self
    }

    /// Validate configuration parameters.
    ///
    /// Comparisons are written so that NaN fails every range check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.leader_count < 2 {
            return Err(ConfigError::TooFewLeaders(self.leader_count));
        }
        if self.population_size <= self.leader_count {
            return Err(ConfigError::PopulationTooSmall {
                population: self.population_size,
                leaders: self.leader_count,
            });
        }
        if self.dimensions == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if !self.search_min.is_finite() || !self.search_max.is_finite() {
            return Err(ConfigError::NonFiniteBounds {
                min: self.search_min,
                max: self.search_max,
            });
        }
        if self.search_min >= self.search_max {
            return Err(ConfigError::DegenerateBounds {
                min: self.search_min,
                max: self.search_max,
            });
        }
        let width = self.domain_width();
        if !(width <= MAX_DOMAIN_WIDTH) {
            return Err(ConfigError::DomainTooWide(width));
        }
        let beta = self.assimilation_coefficient;
        if !(beta > 0.0 && beta.is_finite()) {
            return Err(ConfigError::InvalidAssimilationCoefficient(beta));
        }
        if !(0.0..=1.0).contains(&self.revolution_rate) {
            return Err(ConfigError::InvalidRevolutionRate(self.revolution_rate));
        }
        let zeta = self.revolution_magnitude;
        if !(zeta > 0.0 && zeta <= 1.0) {
            return Err(ConfigError::InvalidRevolutionMagnitude(zeta));
        }
        if !(self.decay_rate >= 0.0 && self.decay_rate.is_finite()) {
            return Err(ConfigError::InvalidDecayRate(self.decay_rate));
        }
        let threshold = self.unification_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigError::InvalidUnificationThreshold(threshold));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::InvalidMaxIterations);
        }
        Ok(())
    }
}

/// A complete run description: parameters plus the built-in objective to minimize.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    /// Algorithm parameters.
    #[serde(default)]
    pub ica: IcaConfig,
    /// Objective function to minimize.
    #[serde(default)]
    pub objective: BenchmarkFunction,
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Leader count must be at least 2 (got {0})")]
    TooFewLeaders(usize),
    #[error("Population size {population} must exceed leader count {leaders}")]
    PopulationTooSmall { population: usize, leaders: usize },
    #[error("Dimension count must be non-zero")]
    InvalidDimensions,
    #[error("Search bounds must be finite (got [{min}, {max}])")]
    NonFiniteBounds { min: f64, max: f64 },
    #[error("Search minimum {min} must be below maximum {max}")]
    DegenerateBounds { min: f64, max: f64 },
    #[error("Search domain width {0} is too large (at most f64::MAX / 4)")]
    DomainTooWide(f64),
    #[error("Assimilation coefficient must be positive (got {0})")]
    InvalidAssimilationCoefficient(f64),
    #[error("Revolution rate must lie in [0, 1] (got {0})")]
    InvalidRevolutionRate(f64),
    #[error("Revolution magnitude must lie in (0, 1] (got {0})")]
    InvalidRevolutionMagnitude(f64),
    #[error("Decay rate must be non-negative (got {0})")]
    InvalidDecayRate(f64),
    #[error("Unification threshold must lie in (0, 1] (got {0})")]
    InvalidUnificationThreshold(f64),
    #[error("Iteration budget must be non-zero")]
    InvalidMaxIterations,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(IcaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_leader_count_bounds() {
        let config = IcaConfig {
            leader_count: 1,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::TooFewLeaders(1)));

        let config = IcaConfig {
            population_size: 10,
            leader_count: 10,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PopulationTooSmall { .. })
        ));
    }

    #[test]
    fn test_degenerate_bounds_rejected() {
        let config = IcaConfig {
            search_min: 5.0,
            search_max: 5.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DegenerateBounds { .. })
        ));

        let config = IcaConfig {
            search_max: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFiniteBounds { .. })
        ));
    }

    #[test]
    fn test_huge_domain_rejected() {
        // Width overflows to infinity.
        let config = IcaConfig {
            search_min: -1e308,
            search_max: 1e308,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::DomainTooWide(f64::INFINITY))
        );

        // Finite width, still too wide to sample.
        let config = IcaConfig {
            search_min: -8e307,
            search_max: 8e307,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DomainTooWide(width)) if width.is_finite()
        ));

        let config = IcaConfig {
            search_min: -MAX_DOMAIN_WIDTH / 2.0,
            search_max: MAX_DOMAIN_WIDTH / 2.0,
            ..Default::default()
        };
        assert_eq!(config.domain_width(), MAX_DOMAIN_WIDTH);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nan_parameters_rejected() {
        let config = IcaConfig {
            assimilation_coefficient: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = IcaConfig {
            revolution_rate: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = IcaConfig {
            unification_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_range_edges() {
        let config = IcaConfig {
            revolution_rate: 0.0,
            revolution_magnitude: 1.0,
            decay_rate: 0.0,
            unification_threshold: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let config = IcaConfig {
            revolution_magnitude: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidRevolutionMagnitude(0.0))
        );

        let config = IcaConfig {
            max_iterations: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidMaxIterations));
    }

    #[test]
    fn test_serialization_defaults() {
        let parsed: IcaConfig = serde_json::from_str(r#"{"leader_count": 4}"#).unwrap();
        assert_eq!(parsed.leader_count, 4);
        assert_eq!(parsed.population_size, 100);
        assert_eq!(parsed.random_seed, None);

        let run: RunConfig =
            serde_json::from_str(r#"{"objective": "rastrigin", "ica": {"dimensions": 3}}"#)
                .unwrap();
        assert_eq!(run.objective, BenchmarkFunction::Rastrigin);
        assert_eq!(run.ica.dimensions, 3);
    }
}
