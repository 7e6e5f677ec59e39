use serde::{Deserialize, Serialize};

use crate::EstimateError;
use crate::calculations::common::ensure_non_negative;

/// Global rates applied uniformly to every line item of a budget.
///
/// Percentages are expressed in points (`10.0` means 10%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetRates {
    /// Cost of one labor hour.
    pub labor_rate: f64,
    pub overhead_pct: f64,
    pub profit_pct: f64,
    pub tax_pct: f64,
}

impl BudgetRates {
    pub fn validate(&self) -> Result<(), EstimateError> {
        ensure_non_negative("labor_rate", self.labor_rate)?;
        ensure_non_negative("overhead_pct", self.overhead_pct)?;
        ensure_non_negative("profit_pct", self.profit_pct)?;
        ensure_non_negative("tax_pct", self.tax_pct)?;
        Ok(())
    }
}

impl Default for BudgetRates {
    fn default() -> Self {
        Self {
            labor_rate: 25.0,
            overhead_pct: 10.0,
            profit_pct: 10.0,
            tax_pct: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_rates() {
        let rates = BudgetRates::default();

        assert_eq!(rates.labor_rate, 25.0);
        assert_eq!(rates.overhead_pct, 10.0);
        assert_eq!(rates.profit_pct, 10.0);
        assert_eq!(rates.tax_pct, 0.0);
    }

    #[test]
    fn validate_rejects_negative_tax() {
        let rates = BudgetRates {
            tax_pct: -5.0,
            ..BudgetRates::default()
        };

        assert_eq!(
            rates.validate(),
            Err(EstimateError::InvalidInput {
                field: "tax_pct".to_string(),
                value: -5.0,
            })
        );
    }

    #[test]
    fn validate_rejects_infinite_labor_rate() {
        let rates = BudgetRates {
            labor_rate: f64::INFINITY,
            ..BudgetRates::default()
        };

        assert!(rates.validate().is_err());
    }
}
