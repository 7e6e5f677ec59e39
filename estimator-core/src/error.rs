use thiserror::Error;

/// Errors raised when estimate inputs cannot be turned into costed totals.
///
/// Every variant is terminal for the request that produced it: nothing is
/// computed, and the caller is expected to correct the input and resubmit.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EstimateError {
    /// A numeric input was negative, NaN or infinite.
    #[error("invalid input: {field} must be a finite, non-negative number, got {value}")]
    InvalidInput { field: String, value: f64 },

    /// A value used as a divisor was zero.
    #[error("invalid input: {field} must be greater than zero")]
    DivideByZero { field: String },

    /// Walls are plastered on one side or both.
    #[error("invalid input: wall sides must be 1 or 2, got {0}")]
    InvalidSides(u8),

    /// The inputs were valid but an intermediate value overflowed.
    #[error("{field} is too large to represent")]
    NonFiniteResult { field: &'static str },
}

impl EstimateError {
    pub(crate) fn invalid(
        field: impl Into<String>,
        value: f64,
    ) -> Self {
        Self::InvalidInput {
            field: field.into(),
            value,
        }
    }
}
