//! Paginated text documents for printing or archiving an estimate.
//!
//! A document is a title plus body lines. Rendering splits the body into
//! pages of at most `lines_per_page` lines; pages are separated by a form
//! feed and end with a `Page n of m` footer.

use std::path::Path;

use estimator_core::calculations::common::format_money;
use estimator_core::{Budget, BudgetRates, MaterialRates, PlasterResult, WallSpec};
use thiserror::Error;

/// Body lines per page: an A4 page written from y=800 down to a 50pt
/// margin at 15pt per line.
pub const DEFAULT_LINES_PER_PAGE: usize = 50;

const PAGE_BREAK: char = '\u{0c}';

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    title: String,
    lines: Vec<String>,
    lines_per_page: usize,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
            lines_per_page: DEFAULT_LINES_PER_PAGE,
        }
    }

    /// Changes the page size. A budget of zero is treated as one line.
    pub fn with_lines_per_page(
        mut self,
        lines_per_page: usize,
    ) -> Self {
        self.lines_per_page = lines_per_page.max(1);
        self
    }

    pub fn push(
        &mut self,
        line: impl Into<String>,
    ) {
        self.lines.push(line.into());
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Body lines grouped by page. An empty document still has one page.
    pub fn pages(&self) -> Vec<&[String]> {
        if self.lines.is_empty() {
            return vec![&self.lines[..]];
        }
        self.lines.chunks(self.lines_per_page).collect()
    }

    pub fn page_count(&self) -> usize {
        self.pages().len()
    }

    pub fn render(&self) -> String {
        let pages = self.pages();
        let total = pages.len();
        let mut out = String::new();

        for (index, body) in pages.iter().enumerate() {
            if index > 0 {
                out.push(PAGE_BREAK);
                out.push('\n');
                out.push_str(&format!("{} (continued)\n", self.title));
            } else {
                out.push_str(&self.title);
                out.push('\n');
            }
            out.push('\n');
            for line in body.iter() {
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
            out.push_str(&format!("Page {} of {}\n", index + 1, total));
        }
        out
    }

    pub fn write_to_file(
        &self,
        path: &Path,
    ) -> Result<(), ExportError> {
        std::fs::write(path, self.render())?;
        tracing::debug!(path = %path.display(), pages = self.page_count(), "document written");
        Ok(())
    }
}

/// Document for a plaster estimate.
pub fn plaster_document(
    wall: &WallSpec,
    rates: &MaterialRates,
    result: &PlasterResult,
) -> Document {
    let mut doc = Document::new("Construction estimate - Wall plaster");

    doc.push(format!(
        "Wall: {:.2} m x {:.2} m, {}, {:.1} cm thick",
        wall.length,
        wall.height,
        wall.sides.label().to_lowercase(),
        wall.thickness_cm
    ));
    doc.push(format!(
        "Rates: {:.2} m² per bag, {} per bag, {} labor per m², sand ratio {}",
        rates.bag_yield_m2,
        format_money(rates.bag_price),
        format_money(rates.labor_price_per_m2),
        rates.sand_ratio
    ));
    doc.push(String::new());
    doc.push(format!("Total area: {:.2} m²", result.area));
    doc.push(format!("Plaster volume: {:.3} m³", result.volume));
    doc.push(format!(
        "Cement: {:.1} bags ({})",
        result.cement_bags,
        format_money(result.cement_cost)
    ));
    doc.push(format!("Sand volume: {:.3} m³", result.sand_volume));
    doc.push(format!("Labor cost: {}", format_money(result.labor_cost)));
    doc.push(String::new());
    doc.push(format!("Estimated total cost: {}", format_money(result.total_cost)));
    doc
}

/// Document for an itemized budget prepared for `client`.
pub fn budget_document(
    client: &str,
    budget: &Budget,
    rates: &BudgetRates,
) -> Document {
    let mut doc = Document::new(format!("Construction budget - {client}"));

    doc.push(format!(
        "{:<28} {:>9} {:<6} {:>10} {:>11} {:>11} {:>11}",
        "Description", "Qty", "Unit", "Unit price", "Material", "Labor", "Subtotal"
    ));
    for line in &budget.lines {
        doc.push(format!(
            "{:<28} {:>9.2} {:<6} {:>10} {:>11} {:>11} {:>11}",
            line.item.description,
            line.item.quantity,
            line.item.unit,
            format_money(line.item.unit_price),
            format_money(line.material_cost),
            format_money(line.labor_cost),
            format_money(line.subtotal)
        ));
    }
    doc.push(String::new());
    doc.push(format!("Subtotal: {}", format_money(budget.subtotal)));
    doc.push(format!(
        "Overhead ({}%): {}",
        rates.overhead_pct,
        format_money(budget.overhead)
    ));
    doc.push(format!("Profit ({}%): {}", rates.profit_pct, format_money(budget.profit)));
    doc.push(format!("Tax ({}%): {}", rates.tax_pct, format_money(budget.tax)));
    doc.push(format!("Total: {}", format_money(budget.total)));
    doc
}
