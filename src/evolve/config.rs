//! Optimizer configuration.
//!
//! [`EvolveConfig`] holds all parameters that control the evolutionary loop.
//! The campaign owns one config for the duration of a phase-2 grid point;
//! configs are cheap to clone and never shared across points.

use crate::error::ConfigError;

/// Configuration for the population-based refinement search.
///
/// # Defaults
///
/// ```
/// use transfer_search::evolve::EvolveConfig;
///
/// let config = EvolveConfig::default();
/// assert_eq!(config.population_size, 128);
/// assert_eq!(config.generation_count, 32);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use transfer_search::evolve::EvolveConfig;
///
/// let config = EvolveConfig::default()
///     .with_population_size(1024)
///     .with_generation_count(10)
///     .with_seed(123);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EvolveConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Number of synchronous generation rounds to run.
    ///
    /// There is no other timeout or cancellation primitive: a bounded
    /// generation count is what bounds an `optimize` call.
    pub generation_count: usize,

    /// Individuals copied unchanged into the next generation.
    pub elite_count: usize,

    /// Probability of recombining two parents (0.0–1.0). When crossover is
    /// not applied, one parent is cloned.
    pub crossover_rate: f64,

    /// Probability of perturbing an offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Tournament size for parent selection.
    pub tournament_size: usize,

    /// Seed for the optimizer's random stream. Identical seed, config,
    /// bounds, and evaluator reproduce a bit-identical champion.
    pub seed: u64,

    /// Whether to evaluate one generation's individuals in parallel using
    /// rayon. Does not affect the result: evaluators are pure and the
    /// variation step stays sequential.
    pub parallel: bool,
}

impl Default for EvolveConfig {
    fn default() -> Self {
        Self {
            population_size: 128,
            generation_count: 32,
            elite_count: 2,
            crossover_rate: 0.9,
            mutation_rate: 0.2,
            tournament_size: 3,
            seed: 0,
            parallel: true,
        }
    }
}

impl EvolveConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generation rounds.
    pub fn with_generation_count(mut self, n: usize) -> Self {
        self.generation_count = n;
        self
    }

    /// Sets the number of elites preserved per generation.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k.max(1);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.generation_count == 0 {
            return Err(ConfigError::NoGenerations);
        }
        if self.elite_count >= self.population_size {
            return Err(ConfigError::TooManyElites {
                elites: self.elite_count,
                population: self.population_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EvolveConfig::default().validate().is_ok());
    }

    #[test]
    fn builder_sets_fields() {
        let config = EvolveConfig::default()
            .with_population_size(1024)
            .with_generation_count(10)
            .with_elite_count(8)
            .with_crossover_rate(0.8)
            .with_mutation_rate(0.05)
            .with_tournament_size(5)
            .with_seed(123)
            .with_parallel(false);

        assert_eq!(config.population_size, 1024);
        assert_eq!(config.generation_count, 10);
        assert_eq!(config.elite_count, 8);
        assert!((config.crossover_rate - 0.8).abs() < 1e-12);
        assert!((config.mutation_rate - 0.05).abs() < 1e-12);
        assert_eq!(config.tournament_size, 5);
        assert_eq!(config.seed, 123);
        assert!(!config.parallel);
    }

    #[test]
    fn rates_are_clamped() {
        let config = EvolveConfig::default()
            .with_crossover_rate(1.5)
            .with_mutation_rate(-0.3);
        assert_eq!(config.crossover_rate, 1.0);
        assert_eq!(config.mutation_rate, 0.0);
    }

    #[test]
    fn validate_rejects_tiny_population() {
        let config = EvolveConfig::default().with_population_size(1);
        assert_eq!(config.validate(), Err(ConfigError::PopulationTooSmall(1)));
    }

    #[test]
    fn validate_rejects_zero_generations() {
        let config = EvolveConfig::default().with_generation_count(0);
        assert_eq!(config.validate(), Err(ConfigError::NoGenerations));
    }

    #[test]
    fn validate_rejects_elite_overflow() {
        let config = EvolveConfig::default()
            .with_population_size(4)
            .with_elite_count(4);
        assert!(config.validate().is_err());
    }
}
