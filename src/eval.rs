//! Shared data model and the contracts of the external collaborators.
//!
//! The search driver knows nothing about orbital mechanics. Everything
//! physical is hidden behind [`CostEvaluator`]: given a departure epoch, a
//! time of flight, a revolution count, and a vector of free shaping
//! coefficients, it reports the velocity-change cost of the resulting
//! transfer, or fails. Implementations wrap a trajectory-shaping method and
//! an ephemeris; tests use synthetic closed-form evaluators.

use crate::error::EvaluationError;

/// One point of the departure-epoch × time-of-flight search grid.
///
/// Both coordinates are in days. Transient: recomputed on each sweep, never
/// stored beyond the record it produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    /// Departure epoch, days.
    pub epoch: f64,

    /// Transfer duration, days.
    pub time_of_flight: f64,
}

/// Output of one optimizer run: the best individual found.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Velocity-change cost. Finite and non-negative for a valid candidate.
    pub cost: f64,

    /// Revolution count the candidate was evaluated at.
    pub revolutions: u32,

    /// Free shaping coefficients of the candidate.
    pub free_parameters: Vec<f64>,
}

/// Sentinel cost carried by records whose grid point produced no valid
/// trajectory. Kept infinite so invalid records always lose a cost
/// comparison and are trivially distinguishable in the output files.
pub const INVALID_COST: f64 = f64::INFINITY;

/// The externally visible unit of output: one row per grid point.
///
/// Records are immutable once created and appended to their stream in grid
/// enumeration order (outer time of flight, inner epoch). A grid point where
/// every evaluation failed still yields a record, flagged invalid, so record
/// index and grid index stay aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    /// Transfer duration, days.
    pub time_of_flight: f64,

    /// Departure epoch, days.
    pub epoch: f64,

    /// Minimum cost found at this point, or [`INVALID_COST`].
    pub best_cost: f64,

    /// Revolution count of the best trajectory; `None` when invalid.
    pub revolutions: Option<u32>,
}

impl ResultRecord {
    /// Record for a grid point with a valid best trajectory.
    pub fn new(point: GridPoint, best_cost: f64, revolutions: u32) -> Self {
        Self {
            time_of_flight: point.time_of_flight,
            epoch: point.epoch,
            best_cost,
            revolutions: Some(revolutions),
        }
    }

    /// Sentinel record for a grid point where every evaluation failed.
    pub fn invalid(point: GridPoint) -> Self {
        Self {
            time_of_flight: point.time_of_flight,
            epoch: point.epoch,
            best_cost: INVALID_COST,
            revolutions: None,
        }
    }

    /// Whether this record carries a real cost.
    pub fn is_valid(&self) -> bool {
        self.best_cost.is_finite()
    }
}

/// Cost model for a shaped transfer trajectory.
///
/// Must be pure with respect to its inputs: the revolution sweep relies on
/// evaluation order not mattering beyond the documented lowest-revolution
/// tie-break. `Send + Sync` because the optimizer may evaluate one
/// generation's individuals in parallel.
pub trait CostEvaluator: Send + Sync {
    /// Computes the velocity-change cost of the transfer described by the
    /// arguments, in the same units across all calls.
    ///
    /// `free_parameters` is empty for the baseline configuration. A returned
    /// non-finite cost is treated as invalid by all callers, the same as an
    /// `Err`.
    fn evaluate(
        &self,
        epoch: f64,
        time_of_flight: f64,
        revolutions: u32,
        free_parameters: &[f64],
    ) -> Result<f64, EvaluationError>;
}

impl<E: CostEvaluator + ?Sized> CostEvaluator for &E {
    fn evaluate(
        &self,
        epoch: f64,
        time_of_flight: f64,
        revolutions: u32,
        free_parameters: &[f64],
    ) -> Result<f64, EvaluationError> {
        (**self).evaluate(epoch, time_of_flight, revolutions, free_parameters)
    }
}

/// Builds the two evaluator configurations a campaign needs.
///
/// The campaign owns the factory; the factory typically borrows an
/// [`EphemerisProvider`] for its lifetime and bakes departure/arrival state
/// lookup into the evaluators it returns.
pub trait EvaluatorFactory {
    type Evaluator: CostEvaluator;

    /// Zero-free-parameter evaluator used by the phase-1 baseline sweep.
    fn baseline(&self) -> Self::Evaluator;

    /// Evaluator exposing the additional free shaping coefficients tuned in
    /// phase 2. Expects `free_parameter_count()` parameters per call.
    fn refined(&self) -> Self::Evaluator;

    /// Number of free parameters the refined evaluator expects.
    fn free_parameter_count(&self) -> usize;
}

/// Body state lookup consumed when constructing evaluators.
///
/// Upstream of [`CostEvaluator`]; the search driver itself never calls it.
pub trait EphemerisProvider {
    /// Cartesian position and velocity of the body at `epoch` (days),
    /// `[x, y, z, vx, vy, vz]` in the provider's frame.
    fn state_at(&self, epoch: f64) -> [f64; 6];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_record_has_sentinel_cost_and_no_revolutions() {
        let record = ResultRecord::invalid(GridPoint {
            epoch: 7304.5,
            time_of_flight: 500.0,
        });
        assert!(!record.is_valid());
        assert_eq!(record.best_cost, INVALID_COST);
        assert_eq!(record.revolutions, None);
    }

    #[test]
    fn valid_record_keeps_point_coordinates() {
        let point = GridPoint {
            epoch: 7319.5,
            time_of_flight: 505.0,
        };
        let record = ResultRecord::new(point, 12.25, 2);
        assert!(record.is_valid());
        assert_eq!(record.epoch, 7319.5);
        assert_eq!(record.time_of_flight, 505.0);
        assert_eq!(record.revolutions, Some(2));
    }
}
