use serde::{Deserialize, Serialize};

use crate::EstimateError;

/// How many faces of the wall receive plaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WallSides {
    #[default]
    One,
    Two,
}

impl WallSides {
    pub fn count(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// Area multiplier applied to `length × height`.
    pub fn multiplier(self) -> f64 {
        f64::from(self.count())
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::One => "One side only",
            Self::Two => "Both sides",
        }
    }
}

impl TryFrom<u8> for WallSides {
    type Error = EstimateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(EstimateError::InvalidSides(other)),
        }
    }
}

impl From<WallSides> for u8 {
    fn from(sides: WallSides) -> Self {
        sides.count()
    }
}

/// Measurements of the wall to plaster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallSpec {
    /// Wall length in metres.
    pub length: f64,
    /// Wall height in metres.
    pub height: f64,
    pub sides: WallSides,
    /// Plaster layer thickness in centimetres.
    pub thickness_cm: f64,
}

impl Default for WallSpec {
    fn default() -> Self {
        Self {
            length: 8.0,
            height: 2.2,
            sides: WallSides::One,
            thickness_cm: 2.0,
        }
    }
}
