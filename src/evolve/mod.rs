//! Phase-2 population optimizer.
//!
//! A real-vector evolutionary search over the free shaping coefficients of a
//! transfer whose epoch, time of flight, and revolution count are fixed.
//! The loop runs a configured number of synchronous generation rounds and
//! returns the champion found across all of them.
//!
//! # Key Types
//!
//! - [`EvolveConfig`]: Algorithm parameters (population size, rates, seed)
//! - [`ParameterBounds`]: The sampled free-parameter box
//! - [`PopulationOptimizer`]: Executes the evolutionary loop
//! - [`EvolveResult`]: Champion plus per-generation statistics

mod config;
mod runner;
mod types;

pub use config::EvolveConfig;
pub use runner::{EvolveResult, PopulationOptimizer};
pub use types::ParameterBounds;
