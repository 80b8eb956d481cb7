//! Engine errors.

use crate::schema::ConfigError;

use super::objective::ObjectiveError;

/// Errors surfaced by the engine. None of them leaves a run half-updated
/// in a state the caller is expected to keep using.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IcaError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Objective(#[from] ObjectiveError),
    #[error("Position has {got} coordinates, expected {expected}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("Run already terminated after {iterations} iterations")]
    Terminated { iterations: usize },
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, IcaError>;
