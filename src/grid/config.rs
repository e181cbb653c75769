//! Grid sweep configuration.
//!
//! [`GridAxis`] discretizes one search axis, [`GridConfig`] combines the two
//! axes with the revolution range swept at each point.

use crate::error::ConfigError;

/// One discretized axis of the search grid.
///
/// Enumeration is floor-division: points are `min + i * step` for
/// `i = 0..=floor((max - min) / step)`. A fractional remainder of the range
/// is truncated, so `max` itself is only enumerated when `step` divides the
/// range evenly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridAxis {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl GridAxis {
    /// Axis stepped by a fixed increment (e.g. a 5-day time-of-flight step).
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Axis enumerated by interval count: `intervals + 1` evenly spaced
    /// points including both bounds (e.g. a 401-point epoch sweep uses 400).
    pub fn from_step_count(min: f64, max: f64, intervals: usize) -> Self {
        Self {
            min,
            max,
            step: (max - min) / intervals as f64,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min.is_finite() && self.max.is_finite() && self.min < self.max) {
            return Err(ConfigError::InvalidBounds {
                min: self.min,
                max: self.max,
            });
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(ConfigError::InvalidStep(self.step));
        }
        Ok(())
    }

    /// Number of grid points on this axis.
    ///
    /// The tolerance absorbs the rounding of steps reconstructed from an
    /// interval count, so `from_step_count(a, b, n)` always yields `n + 1`
    /// points.
    pub fn len(&self) -> usize {
        ((self.max - self.min) / self.step + 1e-9) as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false // a validated axis always contains at least `min`
    }

    /// Enumerates the axis values in ascending order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| self.min + i as f64 * self.step)
    }
}

/// Configuration of one full grid sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Departure epoch axis, days.
    pub epoch: GridAxis,

    /// Time-of-flight axis, days.
    pub time_of_flight: GridAxis,

    /// Revolution counts `0..=max_revolutions` are swept at every point.
    pub max_revolutions: u32,
}

impl GridConfig {
    pub fn new(epoch: GridAxis, time_of_flight: GridAxis, max_revolutions: u32) -> Self {
        Self {
            epoch,
            time_of_flight,
            max_revolutions,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.epoch.validate()?;
        self.time_of_flight.validate()?;
        Ok(())
    }

    /// Total number of grid points (records produced by one sweep).
    pub fn point_count(&self) -> usize {
        self.epoch.len() * self.time_of_flight.len()
    }
}
