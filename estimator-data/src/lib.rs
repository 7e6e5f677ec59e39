pub mod document;
pub mod line_items;

pub use document::{DEFAULT_LINES_PER_PAGE, Document, ExportError, budget_document, plaster_document};
pub use line_items::{LINE_ITEM_HEADERS, LineItemCsvError};
