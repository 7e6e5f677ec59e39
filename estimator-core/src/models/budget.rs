use serde::{Deserialize, Serialize};

use super::LineItem;

/// A line item together with its derived costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub item: LineItem,
    /// `quantity × unit_price`
    pub material_cost: f64,
    /// `quantity × labor_hours × labor_rate`
    pub labor_cost: f64,
    pub subtotal: f64,
}

/// Costed budget for a list of line items.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Budget {
    pub lines: Vec<BudgetLine>,
    pub subtotal: f64,
    pub overhead: f64,
    pub profit: f64,
    /// Computed on `subtotal + overhead + profit`.
    pub tax: f64,
    pub total: f64,
}

impl Budget {
    pub fn totals(&self) -> BudgetTotals {
        BudgetTotals {
            item_count: self.lines.len(),
            items: self.lines.iter().map(|line| line.item.clone()).collect(),
            subtotal: self.subtotal,
            overhead: self.overhead,
            profit: self.profit,
            tax: self.tax,
            total: self.total,
        }
    }

    /// Sum of the material part of every line.
    pub fn material_cost(&self) -> f64 {
        self.lines.iter().map(|line| line.material_cost).sum()
    }

    /// Sum of the labor part of every line.
    pub fn labor_cost(&self) -> f64 {
        self.lines.iter().map(|line| line.labor_cost).sum()
    }
}

/// Aggregate figures of a [`Budget`] plus the items it was priced from.
///
/// Per-line costs are left out; they follow from the items and the rates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetTotals {
    pub item_count: usize,
    /// Absent in records saved before items were kept.
    #[serde(default)]
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    pub overhead: f64,
    pub profit: f64,
    pub tax: f64,
    pub total: f64,
}
