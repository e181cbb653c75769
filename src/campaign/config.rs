//! Campaign configuration.

use crate::error::ConfigError;
use crate::evolve::{EvolveConfig, ParameterBounds};
use crate::grid::{GridAxis, GridConfig};

/// Configuration of one full two-phase search campaign.
///
/// Phase 1 sweeps the wide baseline grid with the revolution range of
/// `baseline`. Phase 2 walks the narrower refined axes at a single fixed
/// revolution count, running the optimizer over `free_parameter_bounds` at
/// each point.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignConfig {
    /// Phase-1 grid, typically wide and fine (e.g. a 401-point epoch sweep
    /// with a 5-day time-of-flight step).
    pub baseline: GridConfig,

    /// Phase-2 departure epoch axis, a sub-region of the baseline at a
    /// coarser step.
    pub refined_epoch: GridAxis,

    /// Phase-2 time-of-flight axis.
    pub refined_time_of_flight: GridAxis,

    /// Revolution count every phase-2 trajectory is evaluated at.
    pub refined_revolutions: u32,

    /// Bounds of the free shaping coefficients tuned in phase 2 (e.g.
    /// `[-600, 800]` and `[0, 1500]` for two radial-velocity coefficients).
    pub free_parameter_bounds: ParameterBounds,

    /// Optimizer settings, reused at every phase-2 point.
    pub optimizer: EvolveConfig,

    /// Campaign seed. Per-point optimizer seeds are drawn from this stream
    /// in grid-enumeration order, so a full campaign is reproducible while a
    /// single point re-run in isolation is not.
    pub seed: u64,
}

impl CampaignConfig {
    pub fn new(
        baseline: GridConfig,
        refined_epoch: GridAxis,
        refined_time_of_flight: GridAxis,
        free_parameter_bounds: ParameterBounds,
    ) -> Self {
        Self {
            baseline,
            refined_epoch,
            refined_time_of_flight,
            refined_revolutions: 1,
            free_parameter_bounds,
            optimizer: EvolveConfig::default(),
            seed: 0,
        }
    }

    /// Sets the fixed phase-2 revolution count.
    pub fn with_refined_revolutions(mut self, revolutions: u32) -> Self {
        self.refined_revolutions = revolutions;
        self
    }

    /// Sets the optimizer configuration.
    pub fn with_optimizer(mut self, optimizer: EvolveConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    /// Sets the campaign seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.baseline.validate()?;
        self.refined_epoch.validate()?;
        self.refined_time_of_flight.validate()?;
        self.optimizer.validate()?;
        Ok(())
    }

    /// Number of phase-2 grid points (length of both refined streams).
    pub fn refined_point_count(&self) -> usize {
        self.refined_epoch.len() * self.refined_time_of_flight.len()
    }
}
