//! Campaign orchestration.
//!
//! Ties the two search phases together: the baseline grid sweep feeds the
//! wide porkchop picture, the refined sweep optimizes the promising
//! sub-region, and every run produces three index-aligned result streams
//! (baseline / low-order / high-order) ready for the result sink.
//!
//! # Key Types
//!
//! - [`CampaignConfig`]: Both grids, the fixed phase-2 revolution count,
//!   free-parameter bounds, optimizer settings, and the campaign seed
//! - [`Campaign`]: Runs phase 1 to completion, then phase 2
//! - [`CampaignResults`]: The three ordered record streams

mod config;
mod runner;

pub use config::CampaignConfig;
pub use runner::{Campaign, CampaignResults};
