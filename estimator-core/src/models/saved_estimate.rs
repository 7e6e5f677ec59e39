use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Budget, BudgetTotals, PlasterResult, WallSpec};
use crate::EstimateError;
use crate::calculations::common::to_money;

/// Which calculator produced a saved estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateKind {
    Plaster,
    Budget,
}

impl EstimateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plaster => "plaster",
            Self::Budget => "budget",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "plaster" => Some(Self::Plaster),
            "budget" => Some(Self::Budget),
            _ => None,
        }
    }

    /// Heading used when listing saved estimates.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Plaster => "Plaster estimate",
            Self::Budget => "Budget estimate",
        }
    }
}

/// Breakdown stored alongside a saved estimate's total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimateDetails {
    Plaster(PlasterResult),
    Budget(BudgetTotals),
}

impl EstimateDetails {
    pub fn kind(&self) -> EstimateKind {
        match self {
            Self::Plaster(_) => EstimateKind::Plaster,
            Self::Budget(_) => EstimateKind::Budget,
        }
    }
}

/// Application and user a saved estimate belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateOwner {
    pub app_id: String,
    pub user_id: String,
}

impl Default for EstimateOwner {
    fn default() -> Self {
        Self {
            app_id: "default_app_id".to_string(),
            user_id: "default_user".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedEstimate {
    pub id: i64,
    pub kind: EstimateKind,
    /// Description of the work or the client label.
    pub description: String,
    /// Total cost rounded to cents.
    pub value: Decimal,
    pub details: Option<EstimateDetails>,
    pub created_at: DateTime<Utc>,
}

/// For saving new estimates (no id or timestamp)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSavedEstimate {
    pub kind: EstimateKind,
    pub description: String,
    pub value: Decimal,
    pub details: Option<EstimateDetails>,
}

impl NewSavedEstimate {
    /// Record for a plaster calculation, described by the wall's dimensions.
    pub fn from_plaster(
        wall: &WallSpec,
        result: &PlasterResult,
    ) -> Result<Self, EstimateError> {
        Ok(Self {
            kind: EstimateKind::Plaster,
            description: format!("Wall plaster ({}x{}m)", wall.length, wall.height),
            value: to_money(result.total_cost)?,
            details: Some(EstimateDetails::Plaster(*result)),
        })
    }

    /// Record for an itemized budget prepared for `client`.
    pub fn from_budget(
        client: &str,
        budget: &Budget,
    ) -> Result<Self, EstimateError> {
        Ok(Self {
            kind: EstimateKind::Budget,
            description: client.to_string(),
            value: to_money(budget.total)?,
            details: Some(EstimateDetails::Budget(budget.totals())),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{BudgetRates, LineItem, aggregate_budget};

    fn sample_result() -> PlasterResult {
        PlasterResult {
            area: 17.6,
            volume: 0.352,
            cement_bags: 3.911,
            cement_cost: 136.888,
            sand_volume: 0.5476,
            labor_cost: 440.0,
            total_cost: 576.888,
        }
    }

    #[test]
    fn kind_round_trips_through_str() {
        for kind in [EstimateKind::Plaster, EstimateKind::Budget] {
            assert_eq!(EstimateKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(EstimateKind::parse("roof"), None);
    }

    #[test]
    fn from_plaster_describes_wall_and_rounds_value() {
        let new = NewSavedEstimate::from_plaster(&WallSpec::default(), &sample_result()).unwrap();

        assert_eq!(new.kind, EstimateKind::Plaster);
        assert_eq!(new.description, "Wall plaster (8x2.2m)");
        assert_eq!(new.value, dec!(576.89));
        assert_eq!(new.details, Some(EstimateDetails::Plaster(sample_result())));
    }

    #[test]
    fn from_budget_keeps_line_items() {
        let items = vec![
            LineItem::new("Wall", 1.0, "m²", 100.0, 2.0),
            LineItem::new("Cement", 3.0, "bag", 35.0, 0.0),
        ];
        let budget = aggregate_budget(&items, &BudgetRates::default()).unwrap();

        let new = NewSavedEstimate::from_budget("Casa Silva", &budget).unwrap();

        match new.details {
            Some(EstimateDetails::Budget(totals)) => {
                assert_eq!(totals.item_count, 2);
                assert_eq!(totals.items, items);
            }
            other => panic!("expected budget details, got {:?}", other),
        }
    }

    #[test]
    fn from_budget_uses_client_label() {
        let budget = Budget {
            subtotal: 150.0,
            overhead: 15.0,
            profit: 15.0,
            tax: 0.0,
            total: 180.0,
            ..Budget::default()
        };

        let new = NewSavedEstimate::from_budget("Casa Silva", &budget).unwrap();

        assert_eq!(new.kind, EstimateKind::Budget);
        assert_eq!(new.description, "Casa Silva");
        assert_eq!(new.value, dec!(180.00));
        assert_eq!(new.details.as_ref().map(EstimateDetails::kind), Some(EstimateKind::Budget));
    }
}
