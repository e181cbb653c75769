//! Two-phase interplanetary low-thrust transfer search.
//!
//! Explores the departure-epoch × time-of-flight design space of a
//! low-thrust transfer to locate minimum-velocity-change candidates:
//!
//! - **Phase 1 — baseline grid sweep** ([`grid`]): a deterministic sweep
//!   over the full discretized search space, picking the cheapest revolution
//!   count at every point with zero free shaping parameters.
//! - **Phase 2 — refined optimization sweep** ([`evolve`], [`campaign`]): a
//!   population-based stochastic search over extra free shaping coefficients
//!   on a narrower sub-region, with a degenerate low-order trajectory
//!   recomputed at each point for comparison.
//!
//! The physics lives entirely behind the [`eval::CostEvaluator`] trait: this
//! crate knows grid coordinates, cost numbers, and optimizer contracts, and
//! nothing about orbit shaping or ephemerides. A host program supplies the
//! evaluator factory and campaign configuration, runs the campaign, and
//! hands the three result streams to the [`report`] sink.
//!
//! # Architecture
//!
//! Data flows strictly downward: evaluator → explorer/optimizer → campaign →
//! sink. All grid iteration is sequential on the calling thread; only the
//! evaluation of one optimizer generation may fan out to a rayon pool, which
//! is drained and error-checked before the next generation starts.

pub mod campaign;
pub mod error;
pub mod eval;
pub mod evolve;
pub mod grid;
pub mod report;
