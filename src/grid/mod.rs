//! Phase-1 grid search.
//!
//! A deterministic sweep over the discretized departure-epoch ×
//! time-of-flight space, selecting the cheapest revolution count at each
//! point with the baseline (zero-free-parameter) evaluator configuration.
//!
//! # Key Types
//!
//! - [`GridAxis`]: One discretized search axis (floor-division enumeration)
//! - [`GridConfig`]: Both axes plus the swept revolution range
//! - [`GridExplorer`]: Executes the sweep, one record per grid point

mod config;
mod explorer;

pub use config::{GridAxis, GridConfig};
pub use explorer::GridExplorer;
