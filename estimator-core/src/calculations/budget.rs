//! Itemized budget aggregation.
//!
//! Each line is costed as material (`quantity × unit_price`) plus labor
//! (`quantity × labor_hours × labor_rate`). The budget subtotal is the sum of
//! the line subtotals; overhead and profit are percentages of that subtotal,
//! and tax is charged on `subtotal + overhead + profit`.
//!
//! # Example
//!
//! ```
//! use estimator_core::{BudgetRates, LineItem, aggregate_budget};
//!
//! let items = vec![LineItem::new("Plastering", 1.0, "m²", 100.0, 2.0)];
//! let rates = BudgetRates {
//!     labor_rate: 25.0,
//!     overhead_pct: 10.0,
//!     profit_pct: 10.0,
//!     tax_pct: 0.0,
//! };
//!
//! let budget = aggregate_budget(&items, &rates).unwrap();
//!
//! assert_eq!(budget.subtotal, 150.0);
//! assert_eq!(budget.total, 180.0);
//! ```

use tracing::debug;

use crate::calculations::common::ensure_finite;
use crate::{Budget, BudgetLine, BudgetRates, EstimateError, LineItem};

/// Aggregates line items at a fixed set of rates.
#[derive(Debug, Clone)]
pub struct BudgetAggregator {
    rates: BudgetRates,
}

impl BudgetAggregator {
    pub fn new(rates: BudgetRates) -> Self {
        Self { rates }
    }

    /// Costs a single item.
    fn cost_line(
        &self,
        item: &LineItem,
    ) -> Result<BudgetLine, EstimateError> {
        let material_cost = ensure_finite("material_cost", item.quantity * item.unit_price)?;
        let labor_cost = ensure_finite(
            "labor_cost",
            item.quantity * item.labor_hours * self.rates.labor_rate,
        )?;

        Ok(BudgetLine {
            item: item.clone(),
            material_cost,
            labor_cost,
            subtotal: ensure_finite("subtotal", material_cost + labor_cost)?,
        })
    }

    /// Produces the costed budget for `items`.
    ///
    /// An empty item list yields an all-zero budget without consulting the
    /// rates.
    ///
    /// # Errors
    ///
    /// * [`EstimateError::InvalidInput`] if a rate or an item field is
    ///   negative or not finite.
    /// * [`EstimateError::NonFiniteResult`] if a total overflows.
    pub fn aggregate(
        &self,
        items: &[LineItem],
    ) -> Result<Budget, EstimateError> {
        if items.is_empty() {
            return Ok(Budget::default());
        }

        self.rates.validate()?;
        for (index, item) in items.iter().enumerate() {
            item.validate(index)?;
        }

        let lines = items
            .iter()
            .map(|item| self.cost_line(item))
            .collect::<Result<Vec<_>, _>>()?;

        let subtotal = ensure_finite("subtotal", lines.iter().map(|line| line.subtotal).sum())?;
        let overhead = ensure_finite("overhead", subtotal * (self.rates.overhead_pct / 100.0))?;
        let profit = ensure_finite("profit", subtotal * (self.rates.profit_pct / 100.0))?;
        let tax = ensure_finite(
            "tax",
            (subtotal + overhead + profit) * (self.rates.tax_pct / 100.0),
        )?;
        let total = ensure_finite("total", subtotal + overhead + profit + tax)?;

        debug!(items = lines.len(), subtotal, total, "budget aggregated");

        Ok(Budget {
            lines,
            subtotal,
            overhead,
            profit,
            tax,
            total,
        })
    }
}

/// Aggregates `items` at `rates`.
pub fn aggregate_budget(
    items: &[LineItem],
    rates: &BudgetRates,
) -> Result<Budget, EstimateError> {
    BudgetAggregator::new(*rates).aggregate(items)
}
