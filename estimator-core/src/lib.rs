pub mod calculations;
pub mod db;
pub mod error;
pub mod models;
pub mod session;

pub use calculations::{aggregate_budget, compute_plaster, BudgetAggregator, PlasterEstimator};
pub use db::repository::{EstimateRepository, RepositoryError};
pub use error::EstimateError;
pub use models::*;
pub use session::BudgetSession;
