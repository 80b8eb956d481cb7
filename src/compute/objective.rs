//! Pluggable objective functions.

use crate::schema::BenchmarkFunction;

/// Failure of an objective evaluation. Always fatal for the run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ObjectiveError {
    #[error("Objective returned non-finite value {value} at {position:?}")]
    NonFinite { value: f64, position: Vec<f64> },
    #[error("Objective evaluation failed: {0}")]
    Failed(String),
}

/// A cost function to minimize.
pub trait Objective {
    /// Evaluate the cost at `position`.
    fn evaluate(&self, position: &[f64]) -> Result<f64, ObjectiveError>;

    /// Human readable name, used in logs.
    fn name(&self) -> &str {
        "custom"
    }
}

/// Evaluate and reject non-finite costs.
pub(crate) fn evaluate_finite(
    objective: &dyn Objective,
    position: &[f64],
) -> Result<f64, ObjectiveError> {
    let value = objective.evaluate(position)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ObjectiveError::NonFinite {
            value,
            position: position.to_vec(),
        })
    }
}

impl Objective for BenchmarkFunction {
    fn evaluate(&self, position: &[f64]) -> Result<f64, ObjectiveError> {
        Ok(BenchmarkFunction::evaluate(self, position))
    }

    fn name(&self) -> &str {
        BenchmarkFunction::name(self)
    }
}

/// Adapts an infallible closure into an [`Objective`].
pub struct FnObjective<F> {
    name: String,
    func: F,
}

impl<F> FnObjective<F>
where
    F: Fn(&[f64]) -> f64,
{
    /// Wrap `func` under the given name.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Objective for FnObjective<F>
where
    F: Fn(&[f64]) -> f64,
{
    fn evaluate(&self, position: &[f64]) -> Result<f64, ObjectiveError> {
        Ok((self.func)(position))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_objective() {
        let objective = FnObjective::new("shifted", |x: &[f64]| (x[0] - 3.0).powi(2));
        assert_eq!(objective.name(), "shifted");
        assert_eq!(evaluate_finite(&objective, &[3.0]), Ok(0.0));
    }

    #[test]
    fn test_non_finite_rejected() {
        let objective = FnObjective::new("log", |x: &[f64]| x[0].ln());
        let err = evaluate_finite(&objective, &[-1.0]).unwrap_err();
        assert!(matches!(err, ObjectiveError::NonFinite { .. }));

        let objective = FnObjective::new("inv", |x: &[f64]| 1.0 / x[0]);
        assert!(evaluate_finite(&objective, &[0.0]).is_err());
    }

    #[test]
    fn test_benchmark_as_objective() {
        let objective: &dyn Objective = &BenchmarkFunction::Sphere;
        assert_eq!(objective.name(), "sphere");
        assert_eq!(objective.evaluate(&[3.0, 4.0]), Ok(25.0));
    }
}
