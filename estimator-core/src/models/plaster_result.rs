use serde::{Deserialize, Serialize};

/// Quantities and costs derived for one plastered wall.
///
/// `total_cost` is always `cement_cost + labor_cost`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlasterResult {
    /// Plastered surface in m².
    pub area: f64,
    /// Plaster volume in m³.
    pub volume: f64,
    pub cement_bags: f64,
    pub cement_cost: f64,
    /// Sand volume in m³.
    pub sand_volume: f64,
    pub labor_cost: f64,
    pub total_cost: f64,
}
