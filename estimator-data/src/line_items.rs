//! CSV import and export of budget line items.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Header names
//! are the [`LineItem`] field names.
//!
//! | Column        | Required | Type    | Notes                              |
//! |---------------|----------|---------|------------------------------------|
//! | `description` | yes      | string  |                                    |
//! | `quantity`    | yes      | number  | ≥ 0                                |
//! | `unit`        | yes      | string  | free-form label, e.g. `m²`, `bag`  |
//! | `unit_price`  | yes      | number  | ≥ 0                                |
//! | `labor_hours` | no       | number  | per unit, ≥ 0; empty cell means 0  |
//!
//! ```csv
//! description,quantity,unit,unit_price,labor_hours
//! Cement CP-II,12,bag,35.00,0
//! Wall plastering,40,m²,2.50,0.8
//! ```

use std::io::{Read, Write};
use std::path::Path;

use estimator_core::{EstimateError, LineItem};
use serde::Deserialize;

/// Header row written by [`write_items`].
pub const LINE_ITEM_HEADERS: [&str; 5] =
    ["description", "quantity", "unit", "unit_price", "labor_hours"];

#[derive(Debug, Deserialize)]
struct CsvRow {
    description: String,
    quantity: f64,
    unit: String,
    unit_price: f64,
    labor_hours: Option<f64>,
}

/// Errors that can occur while reading or writing line-item CSV.
#[derive(Debug, thiserror::Error)]
pub enum LineItemCsvError {
    /// Bad structure, missing required column, or a cell of the wrong type.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row parsed but holds values an estimate cannot use.
    /// `row` is 1-based, not counting the header.
    #[error("invalid line item on row {row}: {source}")]
    InvalidItem {
        row: usize,
        #[source]
        source: EstimateError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<LineItem, LineItemCsvError> {
    let item = LineItem::new(
        row.description,
        row.quantity,
        row.unit,
        row.unit_price,
        row.labor_hours.unwrap_or(0.0),
    );
    item.validate(row_number - 1)
        .map_err(|source| LineItemCsvError::InvalidItem {
            row: row_number,
            source,
        })?;
    Ok(item)
}

/// Parse line items from any reader. Rows are returned in file order.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<LineItem>, LineItemCsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect()
}

pub fn load_from_str(input: &str) -> Result<Vec<LineItem>, LineItemCsvError> {
    load_from_reader(input.as_bytes())
}

pub fn load_from_file(path: &Path) -> Result<Vec<LineItem>, LineItemCsvError> {
    let file = std::fs::File::open(path)?;
    let items = load_from_reader(file)?;
    tracing::debug!(path = %path.display(), items = items.len(), "loaded line items");
    Ok(items)
}

/// Write `items` as CSV. The header row is written even when `items` is empty.
pub fn write_items<W: Write>(
    writer: W,
    items: &[LineItem],
) -> Result<(), LineItemCsvError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(LINE_ITEM_HEADERS)?;
    for item in items {
        writer.serialize(item)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_csv_string(items: &[LineItem]) -> Result<String, LineItemCsvError> {
    let mut buffer = Vec::new();
    write_items(&mut buffer, items)?;
    // The csv writer only emits UTF-8 from UTF-8 input.
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

pub fn export_to_file(
    path: &Path,
    items: &[LineItem],
) -> Result<(), LineItemCsvError> {
    let file = std::fs::File::create(path)?;
    write_items(file, items)
}
