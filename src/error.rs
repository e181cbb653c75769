//! Error taxonomy for the search driver.
//!
//! Only configuration errors are fatal to a campaign. Evaluation and
//! optimization failures are recovered at the grid-point boundary by the
//! sweep loops, which emit sentinel records instead of aborting.

use thiserror::Error;

/// Malformed search configuration. Raised at construction time; a campaign
/// with an invalid configuration never starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid axis bounds: min={min} must be below max={max}")]
    InvalidBounds { min: f64, max: f64 },

    #[error("axis step must be positive and finite, got {0}")]
    InvalidStep(f64),

    #[error("population_size must be at least 2, got {0}")]
    PopulationTooSmall(usize),

    #[error("generation_count must be at least 1")]
    NoGenerations,

    #[error("elite_count {elites} must be below population_size {population}")]
    TooManyElites { elites: usize, population: usize },

    #[error("parameter bounds are malformed: {0}")]
    InvalidParameterBounds(String),
}

/// A single cost evaluation failed.
///
/// Returned by [`CostEvaluator::evaluate`](crate::eval::CostEvaluator) when a
/// trajectory cannot be shaped for the requested inputs. The grid sweep
/// isolates this to the offending revolution count; the campaign isolates it
/// to the offending grid point.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("cost evaluation failed: {reason}")]
pub struct EvaluationError {
    pub reason: String,
}

impl EvaluationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// An optimizer run aborted.
///
/// Raised when an evaluation inside a generation fails. The optimizer never
/// returns a partial champion after an error; the caller decides whether to
/// skip the grid point (the campaign does) or propagate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizeError {
    #[error("evaluation failed in generation {generation}: {source}")]
    Evaluation {
        generation: usize,
        source: EvaluationError,
    },
}
