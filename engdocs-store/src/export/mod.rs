//! Export sinks.
//!
//! - [`csv`] - UTF-8 comma-separated text with a header row
//! - [`workbook`] - Macro-enabled spreadsheet built from a template

pub mod csv;
pub mod workbook;

pub use self::csv::export_csv;
pub use self::workbook::{WorkbookExport, DEFAULT_TEMPLATE};
