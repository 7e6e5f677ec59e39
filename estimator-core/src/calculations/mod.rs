//! Estimation formulas.
//!
//! Both calculators are pure: identical inputs always produce bit-identical
//! outputs, and invalid inputs are rejected before any arithmetic runs.

pub mod budget;
pub mod common;
pub mod plaster;

pub use budget::{BudgetAggregator, aggregate_budget};
pub use plaster::{CEMENT_BAG_VOLUME_M3, PlasterEstimator, compute_plaster};
