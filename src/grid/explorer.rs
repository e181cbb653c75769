//! Baseline grid sweep.
//!
//! [`GridExplorer`] walks the discretized epoch × time-of-flight grid and,
//! at each point, picks the cheapest trajectory over a small range of
//! revolution counts, evaluated with zero free parameters.

use tracing::{debug, warn};

use super::config::GridConfig;
use crate::error::ConfigError;
use crate::eval::{CostEvaluator, GridPoint, ResultRecord};

/// Deterministic sweep over the full search grid.
///
/// Produces exactly one [`ResultRecord`] per grid point, in enumeration
/// order: outer loop over time of flight, inner loop over epoch. Failures
/// are bulkheaded at the revolution level; a point where every revolution
/// count fails still yields a (sentinel) record, so the output stream stays
/// positionally aligned with the grid.
#[derive(Debug, Clone)]
pub struct GridExplorer {
    config: GridConfig,
}

impl GridExplorer {
    /// Validates the configuration up front; a malformed grid never sweeps.
    pub fn new(config: GridConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Runs the sweep with the given (zero-free-parameter) evaluator.
    pub fn explore<E: CostEvaluator>(&self, evaluator: &E) -> Vec<ResultRecord> {
        let mut records = Vec::with_capacity(self.config.point_count());
        for time_of_flight in self.config.time_of_flight.values() {
            for epoch in self.config.epoch.values() {
                let point = GridPoint {
                    epoch,
                    time_of_flight,
                };
                records.push(self.sweep_revolutions(evaluator, point));
            }
        }
        records
    }

    /// Minimum-cost trajectory at one grid point over `0..=max_revolutions`.
    ///
    /// Replacement requires strict improvement, so equal-cost ties keep the
    /// lowest revolution count encountered.
    fn sweep_revolutions<E: CostEvaluator>(&self, evaluator: &E, point: GridPoint) -> ResultRecord {
        let mut best: Option<(f64, u32)> = None;
        for revolutions in 0..=self.config.max_revolutions {
            let cost =
                match evaluator.evaluate(point.epoch, point.time_of_flight, revolutions, &[]) {
                    Ok(cost) if cost.is_finite() => cost,
                    Ok(cost) => {
                        debug!(
                            epoch = point.epoch,
                            tof = point.time_of_flight,
                            revolutions,
                            cost,
                            "skipping revolution count: non-finite cost"
                        );
                        continue;
                    }
                    Err(err) => {
                        debug!(
                            epoch = point.epoch,
                            tof = point.time_of_flight,
                            revolutions,
                            error = %err,
                            "skipping revolution count: evaluation failed"
                        );
                        continue;
                    }
                };
            if best.map_or(true, |(best_cost, _)| cost < best_cost) {
                best = Some((cost, revolutions));
            }
        }

        match best {
            Some((cost, revolutions)) => ResultRecord::new(point, cost, revolutions),
            None => {
                warn!(
                    epoch = point.epoch,
                    tof = point.time_of_flight,
                    "all revolution counts failed; emitting sentinel record"
                );
                ResultRecord::invalid(point)
            }
        }
    }
}
