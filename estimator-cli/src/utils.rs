use estimator_core::LineItem;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a number.
#[derive(Debug, Error)]
#[error("invalid number '{input}': {source}")]
pub struct ParseNumberError {
    input: String,
    #[source]
    source: std::num::ParseFloatError,
}

#[derive(Debug, Error)]
pub enum ParseLineItemError {
    #[error("expected 'description,quantity,unit,unit_price[,labor_hours]', got {found} field(s) in '{input}'")]
    FieldCount { input: String, found: usize },

    #[error("line item has an empty description: '{0}'")]
    EmptyDescription(String),

    #[error(transparent)]
    Number(#[from] ParseNumberError),
}

/// Normalizes input for number parsing: trims whitespace and removes `_`
/// digit separators.
fn normalize_number_input(s: &str) -> String {
    s.trim().replace('_', "")
}

/// Parses a string into an `f64`.
///
/// Handles `_` as a digit separator (e.g. `"1_234.5"`).
/// Empty or whitespace-only input is treated as 0.
pub fn parse_number(s: &str) -> Result<f64, ParseNumberError> {
    let normalized = normalize_number_input(s);
    if normalized.is_empty() {
        return Ok(0.0);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid number: {}", e);
        ParseNumberError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses `description,quantity,unit,unit_price[,labor_hours]` into a
/// [`LineItem`]. Range checks are left to [`LineItem::validate`].
pub fn parse_line_item(s: &str) -> Result<LineItem, ParseLineItemError> {
    let fields: Vec<&str> = s.split(',').map(str::trim).collect();
    if !(4..=5).contains(&fields.len()) {
        return Err(ParseLineItemError::FieldCount {
            input: s.to_string(),
            found: fields.len(),
        });
    }
    if fields[0].is_empty() {
        return Err(ParseLineItemError::EmptyDescription(s.to_string()));
    }

    let labor_hours = match fields.get(4) {
        Some(hours) => parse_number(hours)?,
        None => 0.0,
    };
    Ok(LineItem::new(
        fields[0],
        parse_number(fields[1])?,
        fields[2],
        parse_number(fields[3])?,
        labor_hours,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_number_accepts_digit_separator() {
        assert_eq!(parse_number("1_234.5").unwrap(), 1234.5);
    }

    #[test]
    fn parse_number_trims_whitespace() {
        assert_eq!(parse_number("  4.5  ").unwrap(), 4.5);
    }

    #[test]
    fn parse_number_empty_treated_as_zero() {
        assert_eq!(parse_number("").unwrap(), 0.0);
        assert_eq!(parse_number("   ").unwrap(), 0.0);
    }

    #[test]
    fn parse_number_invalid_returns_error() {
        let err = parse_number("abc").unwrap_err();

        assert!(err.to_string().starts_with("invalid number 'abc'"));
    }

    #[test]
    fn parse_line_item_with_labor_hours() {
        let item = parse_line_item("Wall plastering, 40, m², 2.50, 0.8").unwrap();

        assert_eq!(item, LineItem::new("Wall plastering", 40.0, "m²", 2.5, 0.8));
    }

    #[test]
    fn parse_line_item_without_labor_hours() {
        let item = parse_line_item("Cement,12,bag,35").unwrap();

        assert_eq!(item.labor_hours, 0.0);
    }

    #[test]
    fn parse_line_item_rejects_wrong_field_count() {
        assert!(matches!(
            parse_line_item("Cement,12"),
            Err(ParseLineItemError::FieldCount { found: 2, .. })
        ));
    }

    #[test]
    fn parse_line_item_rejects_bad_number() {
        assert!(matches!(
            parse_line_item("Cement,twelve,bag,35"),
            Err(ParseLineItemError::Number(_))
        ));
    }

    #[test]
    fn parse_line_item_requires_description() {
        assert!(matches!(
            parse_line_item(" ,1,un,1"),
            Err(ParseLineItemError::EmptyDescription(_))
        ));
    }
}
