//! Working state of a budget being composed.
//!
//! The session owns the item list and the rates; aggregation itself stays
//! pure and is re-run on every call to [`BudgetSession::budget`].

use crate::{Budget, BudgetRates, EstimateError, LineItem, NewSavedEstimate, aggregate_budget};

#[derive(Debug, Clone, Default)]
pub struct BudgetSession {
    items: Vec<LineItem>,
    rates: BudgetRates,
}

impl BudgetSession {
    /// Create an empty session priced at `rates`.
    pub fn new(rates: BudgetRates) -> Result<Self, EstimateError> {
        rates.validate()?;
        Ok(Self {
            items: Vec::new(),
            rates,
        })
    }

    /// Append an item. Invalid items are rejected and the list is left as is.
    pub fn add_item(
        &mut self,
        item: LineItem,
    ) -> Result<(), EstimateError> {
        item.validate(self.items.len())?;
        self.items.push(item);
        Ok(())
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn rates(&self) -> &BudgetRates {
        &self.rates
    }

    /// Replace the rates applied to every item.
    pub fn set_rates(
        &mut self,
        rates: BudgetRates,
    ) -> Result<(), EstimateError> {
        rates.validate()?;
        self.rates = rates;
        Ok(())
    }

    pub fn budget(&self) -> Result<Budget, EstimateError> {
        aggregate_budget(&self.items, &self.rates)
    }

    /// Record to persist for the current items, labelled with `client`.
    pub fn to_saved_estimate(
        &self,
        client: &str,
    ) -> Result<NewSavedEstimate, EstimateError> {
        NewSavedEstimate::from_budget(client, &self.budget()?)
    }

    /// Drop every item, keeping the rates.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
