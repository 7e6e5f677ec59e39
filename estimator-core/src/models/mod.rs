mod budget;
mod budget_rates;
mod line_item;
mod material_rates;
mod plaster_result;
mod saved_estimate;
mod wall_spec;

pub use budget::{Budget, BudgetLine, BudgetTotals};
pub use budget_rates::BudgetRates;
pub use line_item::LineItem;
pub use material_rates::{DEFAULT_SAND_RATIO, MaterialRates};
pub use plaster_result::PlasterResult;
pub use saved_estimate::{
    EstimateDetails, EstimateKind, EstimateOwner, NewSavedEstimate, SavedEstimate,
};
pub use wall_spec::{WallSides, WallSpec};
