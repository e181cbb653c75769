//! Two-phase campaign orchestration.
//!
//! [`Campaign`] drives the search: a full baseline grid sweep, then a
//! refined sweep over a narrower sub-region where each point is optimized
//! over the free shaping coefficients and re-evaluated with the degenerate
//! (all-zero) coefficient vector for comparison. The phases are strictly
//! sequential; phase 2 never starts before the baseline stream is complete.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use super::config::CampaignConfig;
use crate::error::ConfigError;
use crate::eval::{CostEvaluator, EvaluatorFactory, GridPoint, ResultRecord};
use crate::evolve::PopulationOptimizer;
use crate::grid::GridExplorer;

/// The three result streams of a completed campaign.
///
/// `high_order[i]` and `low_order[i]` refer to the identical
/// (epoch, time-of-flight) pair for every index `i`: a failed optimization
/// contributes an invalid record to both streams instead of dropping the
/// point, so positional alignment is never broken.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignResults {
    /// Phase-1 baseline sweep, one record per baseline grid point.
    pub baseline: Vec<ResultRecord>,

    /// Phase-2 degenerate-coefficient comparison, one record per refined
    /// grid point.
    pub low_order: Vec<ResultRecord>,

    /// Phase-2 optimized trajectories, one record per refined grid point.
    pub high_order: Vec<ResultRecord>,
}

/// Sequential driver of the two search phases.
///
/// Owns the explorer, the optimizer, and all three result streams for the
/// duration of a run. Failures below the grid-point level are recovered
/// locally; a constructed campaign always runs to completion.
#[derive(Debug, Clone)]
pub struct Campaign {
    config: CampaignConfig,
    explorer: GridExplorer,
    optimizer: PopulationOptimizer,
}

impl Campaign {
    /// Validates the whole configuration; the only fatal error of a
    /// campaign's lifetime happens here.
    pub fn new(config: CampaignConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let explorer = GridExplorer::new(config.baseline.clone())?;
        let optimizer = PopulationOptimizer::new(config.optimizer.clone())?;
        Ok(Self {
            config,
            explorer,
            optimizer,
        })
    }

    pub fn config(&self) -> &CampaignConfig {
        &self.config
    }

    /// Runs both phases and returns the three result streams.
    pub fn run<F: EvaluatorFactory>(&self, factory: &F) -> CampaignResults {
        info!(
            points = self.config.baseline.point_count(),
            "phase 1: baseline grid sweep"
        );
        let baseline_evaluator = factory.baseline();
        let baseline = self.explorer.explore(&baseline_evaluator);

        info!(
            points = self.config.refined_point_count(),
            revolutions = self.config.refined_revolutions,
            "phase 2: refined optimization sweep"
        );
        let (low_order, high_order) = self.refine(factory);

        CampaignResults {
            baseline,
            low_order,
            high_order,
        }
    }

    fn refine<F: EvaluatorFactory>(
        &self,
        factory: &F,
    ) -> (Vec<ResultRecord>, Vec<ResultRecord>) {
        let revolutions = self.config.refined_revolutions;
        let bounds = &self.config.free_parameter_bounds;
        let zero_parameters = vec![0.0; factory.free_parameter_count()];

        let count = self.config.refined_point_count();
        let mut low_order = Vec::with_capacity(count);
        let mut high_order = Vec::with_capacity(count);

        // One seed stream per campaign, consumed in enumeration order.
        let mut seed_rng = StdRng::seed_from_u64(self.config.seed);

        for time_of_flight in self.config.refined_time_of_flight.values() {
            for epoch in self.config.refined_epoch.values() {
                let point = GridPoint {
                    epoch,
                    time_of_flight,
                };
                let evaluator = factory.refined();
                let point_seed: u64 = seed_rng.random();

                match self.optimizer.optimize_with_seed(
                    &evaluator,
                    point,
                    revolutions,
                    bounds,
                    point_seed,
                ) {
                    Ok(result) if result.champion.cost.is_finite() => {
                        high_order.push(ResultRecord::new(
                            point,
                            result.champion.cost,
                            revolutions,
                        ));
                    }
                    Ok(_) => {
                        warn!(
                            epoch,
                            tof = time_of_flight,
                            "optimizer found no finite-cost individual"
                        );
                        high_order.push(ResultRecord::invalid(point));
                    }
                    Err(err) => {
                        // Bulkhead: the failed point contributes sentinel
                        // records to both streams and the sweep continues.
                        warn!(
                            epoch,
                            tof = time_of_flight,
                            error = %err,
                            "optimization failed; skipping grid point"
                        );
                        high_order.push(ResultRecord::invalid(point));
                        low_order.push(ResultRecord::invalid(point));
                        continue;
                    }
                }

                // Low-order comparison at the same point: the refined
                // trajectory with every free coefficient forced to zero.
                match evaluator.evaluate(
                    point.epoch,
                    point.time_of_flight,
                    revolutions,
                    &zero_parameters,
                ) {
                    Ok(cost) if cost.is_finite() => {
                        low_order.push(ResultRecord::new(point, cost, revolutions));
                    }
                    Ok(cost) => {
                        warn!(epoch, tof = time_of_flight, cost, "low-order cost not finite");
                        low_order.push(ResultRecord::invalid(point));
                    }
                    Err(err) => {
                        warn!(
                            epoch,
                            tof = time_of_flight,
                            error = %err,
                            "low-order evaluation failed"
                        );
                        low_order.push(ResultRecord::invalid(point));
                    }
                }
            }
        }

        (low_order, high_order)
    }
}
