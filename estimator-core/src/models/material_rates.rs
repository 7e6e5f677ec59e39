use serde::{Deserialize, Serialize};

/// Parts of sand per part of cement when none is given.
pub const DEFAULT_SAND_RATIO: f64 = 4.0;

/// Unit prices and yields used by the plaster estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialRates {
    /// Square metres of wall covered by one bag of cement.
    pub bag_yield_m2: f64,
    pub bag_price: f64,
    pub labor_price_per_m2: f64,
    pub sand_ratio: f64,
}

impl Default for MaterialRates {
    fn default() -> Self {
        Self {
            bag_yield_m2: 4.5,
            bag_price: 35.0,
            labor_price_per_m2: 25.0,
            sand_ratio: DEFAULT_SAND_RATIO,
        }
    }
}
