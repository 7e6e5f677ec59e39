use serde::{Deserialize, Serialize};

use crate::EstimateError;
use crate::calculations::common::ensure_non_negative;

/// One priced entry of an itemized budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    /// Free-form unit label ("m²", "bag", "h").
    pub unit: String,
    pub unit_price: f64,
    /// Labor hours needed per unit.
    pub labor_hours: f64,
}

impl LineItem {
    pub fn new(
        description: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        unit_price: f64,
        labor_hours: f64,
    ) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit: unit.into(),
            unit_price,
            labor_hours,
        }
    }

    /// Checks every numeric field; `index` is the item's position and is used
    /// to name the offending field (`items[3].unit_price`).
    pub fn validate(
        &self,
        index: usize,
    ) -> Result<(), EstimateError> {
        ensure_non_negative(&format!("items[{index}].quantity"), self.quantity)?;
        ensure_non_negative(&format!("items[{index}].unit_price"), self.unit_price)?;
        ensure_non_negative(&format!("items[{index}].labor_hours"), self.labor_hours)?;
        Ok(())
    }
}
