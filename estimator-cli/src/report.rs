//! Terminal output.

use chrono::{DateTime, Local, Utc};
use estimator_core::calculations::common::format_money;
use estimator_core::{EstimateDetails, LineItem, SavedEstimate};
use estimator_data::Document;

pub const NO_HISTORY: &str = "No saved estimates yet.";

/// Document body as plain lines, without page furniture.
pub fn document_text(doc: &Document) -> String {
    let mut out = String::new();
    out.push_str(doc.title());
    out.push_str("\n\n");
    for line in doc.lines() {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Timestamp shown in history headings, in local time.
pub fn history_timestamp(created_at: &DateTime<Utc>) -> String {
    created_at
        .with_timezone(&Local)
        .format("%d/%m/%Y %H:%M")
        .to_string()
}

fn details_line(details: &EstimateDetails) -> String {
    match details {
        EstimateDetails::Plaster(result) => format!(
            "Area {:.2} m² | Cement {:.1} bags | Sand {:.3} m³ | Labor {}",
            result.area,
            result.cement_bags,
            result.sand_volume,
            format_money(result.labor_cost)
        ),
        EstimateDetails::Budget(totals) => format!(
            "{} item(s) | Subtotal {} | Overhead {} | Profit {} | Tax {}",
            totals.item_count,
            format_money(totals.subtotal),
            format_money(totals.overhead),
            format_money(totals.profit),
            format_money(totals.tax)
        ),
    }
}

fn item_line(item: &LineItem) -> String {
    format!(
        "- {}: {} {} at {}, {} h/unit",
        item.description,
        item.quantity,
        item.unit,
        format_money(item.unit_price),
        item.labor_hours
    )
}

/// Saved estimates in the order given, one block per entry.
pub fn history_text(entries: &[SavedEstimate]) -> String {
    if entries.is_empty() {
        return format!("{NO_HISTORY}\n");
    }

    let mut out = String::new();
    for (index, entry) in entries.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(&format!(
            "{} - {}\n",
            entry.kind.title(),
            history_timestamp(&entry.created_at)
        ));
        out.push_str(&format!("  {}\n", entry.description));
        out.push_str(&format!("  Value: {:.2}\n", entry.value));
        if let Some(details) = &entry.details {
            out.push_str(&format!("  {}\n", details_line(details)));
            if let EstimateDetails::Budget(totals) = details {
                for item in &totals.items {
                    out.push_str(&format!("    {}\n", item_line(item)));
                }
            }
        }
    }
    out
}
