//! Wall plaster estimate.
//!
//! | Quantity     | Formula                                   |
//! |--------------|-------------------------------------------|
//! | area         | length × height × sides                   |
//! | volume       | area × (thickness_cm / 100)               |
//! | cement bags  | area / bag_yield_m2                       |
//! | cement cost  | cement bags × bag_price                   |
//! | sand volume  | (cement bags × 0.035) × sand_ratio        |
//! | labor cost   | area × labor_price_per_m2                 |
//! | total cost   | cement cost + labor cost                  |
//!
//! The formulas are evaluated in exactly this order so that the same `f64`
//! inputs always reproduce the same bits.
//!
//! # Example
//!
//! ```
//! use estimator_core::{MaterialRates, WallSpec, compute_plaster};
//!
//! let result = compute_plaster(&WallSpec::default(), &MaterialRates::default()).unwrap();
//!
//! assert!((result.area - 17.6).abs() < 1e-9);
//! assert!((result.total_cost - 576.89).abs() < 1e-2);
//! ```

use tracing::debug;

use crate::calculations::common::{ensure_divisor, ensure_finite, ensure_non_negative};
use crate::{EstimateError, MaterialRates, PlasterResult, WallSpec};

/// Volume of cement in one bag, in m³.
pub const CEMENT_BAG_VOLUME_M3: f64 = 0.035;

/// Calculator for plastered walls at fixed material rates.
#[derive(Debug, Clone)]
pub struct PlasterEstimator {
    rates: MaterialRates,
}

impl PlasterEstimator {
    pub fn new(rates: MaterialRates) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &MaterialRates {
        &self.rates
    }

    /// Validates the material rates.
    ///
    /// # Errors
    ///
    /// * [`EstimateError::DivideByZero`] if `bag_yield_m2` is zero.
    /// * [`EstimateError::InvalidInput`] if any rate is negative or not finite.
    pub fn validate(&self) -> Result<(), EstimateError> {
        ensure_divisor("bag_yield_m2", self.rates.bag_yield_m2)?;
        ensure_non_negative("bag_price", self.rates.bag_price)?;
        ensure_non_negative("labor_price_per_m2", self.rates.labor_price_per_m2)?;
        ensure_non_negative("sand_ratio", self.rates.sand_ratio)?;
        Ok(())
    }

    /// Computes materials and costs for `wall`.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError`] if the wall measurements or the rates are
    /// invalid, or if the result overflows.
    pub fn calculate(
        &self,
        wall: &WallSpec,
    ) -> Result<PlasterResult, EstimateError> {
        self.validate()?;
        let length = ensure_non_negative("length", wall.length)?;
        let height = ensure_non_negative("height", wall.height)?;
        let thickness_cm = ensure_non_negative("thickness_cm", wall.thickness_cm)?;
        let rates = &self.rates;

        let area = ensure_finite("area", length * height * wall.sides.multiplier())?;
        let volume = ensure_finite("volume", area * (thickness_cm / 100.0))?;

        let cement_bags = ensure_finite("cement_bags", area / rates.bag_yield_m2)?;
        let cement_cost = ensure_finite("cement_cost", cement_bags * rates.bag_price)?;

        let sand_volume = ensure_finite(
            "sand_volume",
            (cement_bags * CEMENT_BAG_VOLUME_M3) * rates.sand_ratio,
        )?;

        let labor_cost = ensure_finite("labor_cost", area * rates.labor_price_per_m2)?;
        let total_cost = ensure_finite("total_cost", cement_cost + labor_cost)?;

        debug!(area, cement_bags, total_cost, "plaster estimate computed");

        Ok(PlasterResult {
            area,
            volume,
            cement_bags,
            cement_cost,
            sand_volume,
            labor_cost,
            total_cost,
        })
    }
}

/// Computes a plaster estimate for `wall` at `rates`.
pub fn compute_plaster(
    wall: &WallSpec,
    rates: &MaterialRates,
) -> Result<PlasterResult, EstimateError> {
    PlasterEstimator::new(*rates).calculate(wall)
}
