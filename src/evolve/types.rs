//! Free-parameter search box.

use crate::error::ConfigError;
use rand::Rng;

/// Per-parameter lower and upper bounds for the optimizer's search box.
///
/// The refined evaluator of a campaign exposes extra shaping coefficients;
/// these bounds delimit the region the optimizer samples them from.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterBounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl ParameterBounds {
    /// Builds and validates a bounds box. Both vectors must have the same
    /// non-zero length, with `lower[i] < upper[i]` and all values finite.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self, ConfigError> {
        if lower.len() != upper.len() {
            return Err(ConfigError::InvalidParameterBounds(format!(
                "lower has {} entries, upper has {}",
                lower.len(),
                upper.len()
            )));
        }
        if lower.is_empty() {
            return Err(ConfigError::InvalidParameterBounds(
                "bounds must cover at least one parameter".into(),
            ));
        }
        for (i, (lo, hi)) in lower.iter().zip(&upper).enumerate() {
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(ConfigError::InvalidParameterBounds(format!(
                    "parameter {i}: [{lo}, {hi}]"
                )));
            }
        }
        Ok(Self { lower, upper })
    }

    /// Number of free parameters.
    pub fn len(&self) -> usize {
        self.lower.len()
    }

    pub fn is_empty(&self) -> bool {
        false // construction rejects zero parameters
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Samples a parameter vector uniformly inside the box.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(&lo, &hi)| rng.random_range(lo..hi))
            .collect()
    }

    /// Clamps a parameter vector into the box in place.
    pub fn clamp(&self, parameters: &mut [f64]) {
        for ((value, &lo), &hi) in parameters.iter_mut().zip(&self.lower).zip(&self.upper) {
            *value = value.clamp(lo, hi);
        }
    }

    /// Whether the vector lies inside the box.
    pub fn contains(&self, parameters: &[f64]) -> bool {
        parameters.len() == self.len()
            && parameters
                .iter()
                .zip(&self.lower)
                .zip(&self.upper)
                .all(|((&v, &lo), &hi)| v >= lo && v <= hi)
    }
}
