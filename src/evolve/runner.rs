//! Evolutionary refinement loop.
//!
//! [`PopulationOptimizer`] evolves a population of free-parameter vectors at
//! one fixed (epoch, time-of-flight, revolutions) transfer. Each generation
//! is a synchronous barrier: every individual is evaluated — in parallel when
//! configured — and any evaluation error is surfaced before the next round
//! starts. On error the whole `optimize` call aborts; there is no partial
//! champion.

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::config::EvolveConfig;
use super::types::ParameterBounds;
use crate::error::{ConfigError, EvaluationError, OptimizeError};
use crate::eval::{Candidate, CostEvaluator, GridPoint};

/// A candidate parameter vector with its evaluated cost.
#[derive(Debug, Clone)]
struct Individual {
    parameters: Vec<f64>,
    cost: f64,
}

/// Result of one optimizer run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolveResult {
    /// The best individual found across all generations, regardless of which
    /// generation produced it.
    pub champion: Candidate,

    /// Number of generation rounds executed.
    pub generations: usize,

    /// Champion cost after initialization and after each generation.
    pub cost_history: Vec<f64>,
}

/// Population-based stochastic search over a bounded free-parameter box.
#[derive(Debug, Clone)]
pub struct PopulationOptimizer {
    config: EvolveConfig,
}

impl PopulationOptimizer {
    /// Validates the configuration up front.
    pub fn new(config: EvolveConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EvolveConfig {
        &self.config
    }

    /// Runs the search with the configured seed.
    ///
    /// Identical inputs reproduce a bit-identical result: the random stream
    /// is fully determined by the seed, and parallel evaluation of a pure
    /// evaluator does not touch it.
    pub fn optimize<E: CostEvaluator>(
        &self,
        evaluator: &E,
        point: GridPoint,
        revolutions: u32,
        bounds: &ParameterBounds,
    ) -> Result<EvolveResult, OptimizeError> {
        self.optimize_with_seed(evaluator, point, revolutions, bounds, self.config.seed)
    }

    /// Runs the search with an explicit seed, overriding the configured one.
    ///
    /// The campaign uses this to derive per-point seeds from a single
    /// campaign seed.
    pub fn optimize_with_seed<E: CostEvaluator>(
        &self,
        evaluator: &E,
        point: GridPoint,
        revolutions: u32,
        bounds: &ParameterBounds,
        seed: u64,
    ) -> Result<EvolveResult, OptimizeError> {
        let config = &self.config;
        let mut rng = StdRng::seed_from_u64(seed);

        // Initial population, sampled uniformly inside the bounds box.
        let mut population: Vec<Individual> = (0..config.population_size)
            .map(|_| Individual {
                parameters: bounds.sample(&mut rng),
                cost: f64::INFINITY,
            })
            .collect();

        evaluate_generation(
            evaluator,
            point,
            revolutions,
            &mut population,
            config.parallel,
        )
        .map_err(|source| OptimizeError::Evaluation {
            generation: 0,
            source,
        })?;

        let mut champion = best_of(&population).clone();
        let mut cost_history = Vec::with_capacity(config.generation_count + 1);
        cost_history.push(champion.cost);

        for generation in 1..=config.generation_count {
            population.sort_by(|a, b| a.cost.partial_cmp(&b.cost).unwrap_or(Ordering::Equal));

            let mut next_gen: Vec<Individual> = population[..config.elite_count].to_vec();

            while next_gen.len() < config.population_size {
                let p1 = tournament(&population, config.tournament_size, &mut rng);
                let p2 = tournament(&population, config.tournament_size, &mut rng);

                let mut parameters = if rng.random_range(0.0..1.0) < config.crossover_rate {
                    blend_crossover(
                        &population[p1].parameters,
                        &population[p2].parameters,
                        &mut rng,
                    )
                } else {
                    population[p1].parameters.clone()
                };

                if rng.random_range(0.0..1.0) < config.mutation_rate {
                    mutate(&mut parameters, bounds, &mut rng);
                }
                bounds.clamp(&mut parameters);

                next_gen.push(Individual {
                    parameters,
                    cost: f64::INFINITY,
                });
            }

            // Elites keep their cost from the previous round.
            evaluate_generation(
                evaluator,
                point,
                revolutions,
                &mut next_gen[config.elite_count..],
                config.parallel,
            )
            .map_err(|source| OptimizeError::Evaluation { generation, source })?;

            population = next_gen;

            let generation_best = best_of(&population);
            if generation_best.cost < champion.cost {
                champion = generation_best.clone();
            }
            cost_history.push(champion.cost);
        }

        Ok(EvolveResult {
            champion: Candidate {
                cost: champion.cost,
                revolutions,
                free_parameters: champion.parameters,
            },
            generations: config.generation_count,
            cost_history,
        })
    }
}

/// Evaluates a slice of individuals at the fixed transfer geometry.
///
/// The barrier semantics live here: in the parallel branch every evaluation
/// completes before the first error is surfaced, mirroring a worker pool
/// drained to quiescence and then checked.
fn evaluate_generation<E: CostEvaluator>(
    evaluator: &E,
    point: GridPoint,
    revolutions: u32,
    individuals: &mut [Individual],
    parallel: bool,
) -> Result<(), EvaluationError> {
    if parallel {
        let costs: Vec<Result<f64, EvaluationError>> = individuals
            .par_iter()
            .map(|ind| {
                evaluator.evaluate(
                    point.epoch,
                    point.time_of_flight,
                    revolutions,
                    &ind.parameters,
                )
            })
            .collect();
        for (ind, cost) in individuals.iter_mut().zip(costs) {
            ind.cost = sanitize(cost?);
        }
    } else {
        for ind in individuals.iter_mut() {
            let cost = evaluator.evaluate(
                point.epoch,
                point.time_of_flight,
                revolutions,
                &ind.parameters,
            )?;
            ind.cost = sanitize(cost);
        }
    }
    Ok(())
}

/// Non-finite costs are valid evaluations of infeasible parameters: the
/// individual stays in the population but can never become champion.
fn sanitize(cost: f64) -> f64 {
    if cost.is_finite() {
        cost
    } else {
        f64::INFINITY
    }
}

/// Tournament selection: pick `k` random individuals, return the cheapest.
fn tournament<R: Rng>(population: &[Individual], k: usize, rng: &mut R) -> usize {
    let n = population.len();
    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].cost < population[best_idx].cost {
            best_idx = idx;
        }
    }
    best_idx
}

/// BLX-alpha blend crossover for real-valued vectors.
fn blend_crossover<R: Rng>(p1: &[f64], p2: &[f64], rng: &mut R) -> Vec<f64> {
    const ALPHA: f64 = 0.5;
    p1.iter()
        .zip(p2)
        .map(|(&a, &b)| {
            let lo = a.min(b);
            let hi = a.max(b);
            let range = hi - lo;
            if range < 1e-15 {
                lo
            } else {
                rng.random_range((lo - ALPHA * range)..(hi + ALPHA * range))
            }
        })
        .collect()
}

/// Resamples one random coordinate uniformly within its bounds.
fn mutate<R: Rng>(parameters: &mut [f64], bounds: &ParameterBounds, rng: &mut R) {
    let idx = rng.random_range(0..parameters.len());
    parameters[idx] = rng.random_range(bounds.lower()[idx]..bounds.upper()[idx]);
}

/// Individual with the lowest cost.
fn best_of(population: &[Individual]) -> &Individual {
    population
        .iter()
        .min_by(|a, b| a.cost.partial_cmp(&b.cost).unwrap_or(Ordering::Equal))
        .expect("population must not be empty")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
    use std::sync::Mutex;

    struct FnEvaluator<F>(F);

    impl<F> CostEvaluator for FnEvaluator<F>
    where
        F: Fn(&[f64]) -> Result<f64, EvaluationError> + Send + Sync,
    {
        fn evaluate(
            &self,
            _epoch: f64,
            _time_of_flight: f64,
            _revolutions: u32,
            free_parameters: &[f64],
        ) -> Result<f64, EvaluationError> {
            (self.0)(free_parameters)
        }
    }

    fn point() -> GridPoint {
        GridPoint {
            epoch: 7304.5,
            time_of_flight: 580.0,
        }
    }

    fn unit_box(dim: usize) -> ParameterBounds {
        ParameterBounds::new(vec![0.0; dim], vec![1.0; dim]).unwrap()
    }

    #[test]
    fn identical_seeds_reproduce_identical_champions() {
        let optimizer = PopulationOptimizer::new(
            EvolveConfig::default()
                .with_population_size(32)
                .with_generation_count(10)
                .with_seed(42)
                .with_parallel(false),
        )
        .unwrap();
        let bounds = unit_box(2);
        let evaluator = FnEvaluator(|p: &[f64]| Ok((p[0] - 0.3).powi(2) + (p[1] - 0.7).powi(2)));

        let first = optimizer
            .optimize(&evaluator, point(), 1, &bounds)
            .unwrap();
        let second = optimizer
            .optimize(&evaluator, point(), 1, &bounds)
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn parallel_evaluation_matches_sequential() {
        // The variation step owns the random stream; evaluation is pure, so
        // the parallel and sequential paths must agree bit for bit.
        let bounds = unit_box(3);
        let evaluator = FnEvaluator(|p: &[f64]| Ok(p.iter().map(|x| x * x).sum()));
        let base = EvolveConfig::default()
            .with_population_size(24)
            .with_generation_count(8)
            .with_seed(9);

        let sequential = PopulationOptimizer::new(base.clone().with_parallel(false))
            .unwrap()
            .optimize(&evaluator, point(), 0, &bounds)
            .unwrap();
        let parallel = PopulationOptimizer::new(base.with_parallel(true))
            .unwrap()
            .optimize(&evaluator, point(), 0, &bounds)
            .unwrap();

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn champion_beats_every_sampled_individual() {
        // Maximize the parameter sum, framed as minimizing its negative.
        let sampled = Mutex::new(Vec::new());
        let evaluator = FnEvaluator(|p: &[f64]| {
            let cost = -p.iter().sum::<f64>();
            sampled.lock().unwrap().push(cost);
            Ok(cost)
        });
        let optimizer = PopulationOptimizer::new(
            EvolveConfig::default()
                .with_population_size(4)
                .with_generation_count(1)
                .with_elite_count(1)
                .with_seed(5)
                .with_parallel(false),
        )
        .unwrap();
        let bounds = unit_box(2);

        let result = optimizer
            .optimize(&evaluator, point(), 1, &bounds)
            .unwrap();

        let sampled = sampled.lock().unwrap();
        assert!(!sampled.is_empty());
        for &cost in sampled.iter() {
            assert!(
                result.champion.cost <= cost,
                "champion {} worse than sampled {}",
                result.champion.cost,
                cost
            );
        }
    }

    #[test]
    fn evaluation_error_aborts_without_a_champion() {
        let evaluator = FnEvaluator(|_: &[f64]| -> Result<f64, EvaluationError> {
            Err(EvaluationError::new("shaping matrix is singular"))
        });
        let optimizer = PopulationOptimizer::new(
            EvolveConfig::default()
                .with_population_size(8)
                .with_generation_count(3)
                .with_parallel(false),
        )
        .unwrap();

        let err = optimizer
            .optimize(&evaluator, point(), 1, &unit_box(2))
            .unwrap_err();
        match err {
            OptimizeError::Evaluation { generation, source } => {
                assert_eq!(generation, 0);
                assert!(source.reason.contains("singular"));
            }
        }
    }

    #[test]
    fn late_evaluation_error_reports_its_generation() {
        // Fail only after the initial population has been evaluated.
        let calls = AtomicUsize::new(0);
        let evaluator = FnEvaluator(|p: &[f64]| {
            if calls.fetch_add(1, AtomicOrdering::SeqCst) >= 8 {
                Err(EvaluationError::new("ephemeris out of range"))
            } else {
                Ok(p[0])
            }
        });
        let optimizer = PopulationOptimizer::new(
            EvolveConfig::default()
                .with_population_size(8)
                .with_generation_count(5)
                .with_elite_count(1)
                .with_parallel(false),
        )
        .unwrap();

        let err = optimizer
            .optimize(&evaluator, point(), 1, &unit_box(1))
            .unwrap_err();
        match err {
            OptimizeError::Evaluation { generation, .. } => assert!(generation >= 1),
        }
    }

    #[test]
    fn converges_on_a_smooth_bowl() {
        let evaluator = FnEvaluator(|p: &[f64]| Ok(p.iter().map(|x| x * x).sum()));
        let bounds = ParameterBounds::new(vec![-5.0, -5.0], vec![5.0, 5.0]).unwrap();
        let optimizer = PopulationOptimizer::new(
            EvolveConfig::default()
                .with_population_size(64)
                .with_generation_count(80)
                .with_seed(42)
                .with_parallel(false),
        )
        .unwrap();

        let result = optimizer
            .optimize(&evaluator, point(), 0, &bounds)
            .unwrap();
        assert!(
            result.champion.cost < 1.0,
            "expected near-zero cost, got {}",
            result.champion.cost
        );
        assert!(bounds.contains(&result.champion.free_parameters));
    }

    #[test]
    fn cost_history_is_monotone_with_elitism() {
        let evaluator = FnEvaluator(|p: &[f64]| Ok((p[0] - 0.5).abs()));
        let optimizer = PopulationOptimizer::new(
            EvolveConfig::default()
                .with_population_size(16)
                .with_generation_count(20)
                .with_elite_count(2)
                .with_seed(11)
                .with_parallel(false),
        )
        .unwrap();

        let result = optimizer
            .optimize(&evaluator, point(), 0, &unit_box(1))
            .unwrap();
        assert_eq!(result.cost_history.len(), 21);
        for pair in result.cost_history.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
    }

    #[test]
    fn non_finite_costs_never_become_champion() {
        // Infeasible below 0.5; the champion must come from the feasible side.
        let evaluator = FnEvaluator(|p: &[f64]| {
            if p[0] < 0.5 {
                Ok(f64::NAN)
            } else {
                Ok(p[0])
            }
        });
        let optimizer = PopulationOptimizer::new(
            EvolveConfig::default()
                .with_population_size(32)
                .with_generation_count(5)
                .with_seed(3)
                .with_parallel(false),
        )
        .unwrap();

        let result = optimizer
            .optimize(&evaluator, point(), 1, &unit_box(1))
            .unwrap();
        assert!(result.champion.cost.is_finite());
        assert!(result.champion.cost >= 0.5);
    }

    #[test]
    fn champion_records_the_fixed_revolution_count() {
        let evaluator = FnEvaluator(|p: &[f64]| Ok(p[0]));
        let optimizer = PopulationOptimizer::new(
            EvolveConfig::default()
                .with_population_size(8)
                .with_generation_count(2)
                .with_parallel(false),
        )
        .unwrap();

        let result = optimizer
            .optimize(&evaluator, point(), 3, &unit_box(1))
            .unwrap();
        assert_eq!(result.champion.revolutions, 3);
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        assert!(PopulationOptimizer::new(EvolveConfig::default().with_population_size(0)).is_err());
    }
}
