//! Common helpers shared by the calculators.
//!
//! Input validation lives here together with the conversion of computed
//! `f64` amounts into currency [`Decimal`]s.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::EstimateError;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use estimator_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a computed amount into a currency value rounded to cents.
///
/// # Errors
///
/// Returns [`EstimateError::NonFiniteResult`] when `value` is NaN, infinite
/// or outside the range a [`Decimal`] can hold.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use estimator_core::calculations::common::to_money;
///
/// assert_eq!(to_money(576.8888).unwrap(), dec!(576.89));
/// assert!(to_money(f64::NAN).is_err());
/// ```
pub fn to_money(value: f64) -> Result<Decimal, EstimateError> {
    Decimal::from_f64(value)
        .map(round_half_up)
        .ok_or(EstimateError::NonFiniteResult { field: "amount" })
}

/// Formats an amount for display with two decimals.
///
/// Amounts are rounded like [`to_money`]. A finite amount too large for a
/// [`Decimal`] is printed from the `f64` instead.
///
/// ```
/// use estimator_core::calculations::common::format_money;
///
/// assert_eq!(format_money(0.125), "0.13");
/// ```
pub fn format_money(value: f64) -> String {
    match to_money(value) {
        Ok(amount) => format!("{amount:.2}"),
        Err(_) => format!("{value:.2}"),
    }
}

/// Accepts finite values that are zero or greater.
pub fn ensure_non_negative(
    field: &str,
    value: f64,
) -> Result<f64, EstimateError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(EstimateError::invalid(field, value))
    }
}

/// Accepts finite values strictly greater than zero, for use as divisors.
pub fn ensure_divisor(
    field: &str,
    value: f64,
) -> Result<f64, EstimateError> {
    let value = ensure_non_negative(field, value)?;
    if value == 0.0 {
        return Err(EstimateError::DivideByZero {
            field: field.to_string(),
        });
    }
    Ok(value)
}

/// Rejects overflowed intermediates instead of returning them.
pub(crate) fn ensure_finite(
    field: &'static str,
    value: f64,
) -> Result<f64, EstimateError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EstimateError::NonFiniteResult { field })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_half_up_preserves_already_rounded_values() {
        assert_eq!(round_half_up(dec!(123.45)), dec!(123.45));
    }

    #[test]
    fn round_half_up_handles_large_values() {
        assert_eq!(round_half_up(dec!(999999.999)), dec!(1000000.00));
    }

    // =========================================================================
    // to_money tests
    // =========================================================================

    #[test]
    fn to_money_rounds_to_cents() {
        assert_eq!(to_money(136.88888888888889).unwrap(), dec!(136.89));
    }

    #[test]
    fn to_money_keeps_whole_amounts() {
        assert_eq!(to_money(180.0).unwrap(), dec!(180.00));
    }

    #[test]
    fn to_money_rejects_infinity() {
        assert_eq!(
            to_money(f64::INFINITY),
            Err(EstimateError::NonFiniteResult { field: "amount" })
        );
    }

    #[test]
    fn format_money_rounds_ties_half_up() {
        assert_eq!(format_money(0.125), "0.13");
    }

    #[test]
    fn format_money_pads_whole_amounts() {
        assert_eq!(format_money(180.0), "180.00");
    }

    #[test]
    fn format_money_beyond_decimal_range_uses_float() {
        assert_eq!(format_money(1e30), "1000000000000000019884624838656.00");
    }

    // =========================================================================
    // validation tests
    // =========================================================================

    #[test]
    fn ensure_non_negative_accepts_zero() {
        assert_eq!(ensure_non_negative("length", 0.0), Ok(0.0));
    }

    #[test]
    fn ensure_non_negative_rejects_negative() {
        assert_eq!(
            ensure_non_negative("length", -1.0),
            Err(EstimateError::InvalidInput {
                field: "length".to_string(),
                value: -1.0,
            })
        );
    }

    #[test]
    fn ensure_non_negative_rejects_nan() {
        assert!(ensure_non_negative("height", f64::NAN).is_err());
    }

    #[test]
    fn ensure_divisor_rejects_zero() {
        assert_eq!(
            ensure_divisor("bag_yield_m2", 0.0),
            Err(EstimateError::DivideByZero {
                field: "bag_yield_m2".to_string(),
            })
        );
    }

    #[test]
    fn ensure_divisor_rejects_negative_as_invalid_input() {
        assert!(matches!(
            ensure_divisor("bag_yield_m2", -4.5),
            Err(EstimateError::InvalidInput { .. })
        ));
    }
}
