//! SAR date repair.

use engdocs_core::ResultTable;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{debug, info};

/// Column holding ColdFusion timestamps.
pub const ESTIMATED_DATE_COLUMN: &str = "estimatedDate";

/// Pattern for "{ts 'YYYY-MM-DD HH:MM:SS'}"
static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\{ts '([^' -]+)-([^' -]+)-([^' -]+)(?: [^']*)?'\}$").expect("Invalid regex")
});

/// Rewrites one timestamp as `DD/MM/YYYY`.
///
/// Accepts `{ts 'YYYY-MM-DD HH:MM:SS'}` and, as a fallback, any text whose
/// second space-separated token is `YYYY-MM-DD`. Returns `None` when the
/// value matches neither.
pub fn repair_date(value: &str) -> Option<String> {
    if let Some(caps) = TIMESTAMP_RE.captures(value) {
        return Some(format!("{}/{}/{}", &caps[3], &caps[2], &caps[1]));
    }
    if value.starts_with("{ts '") {
        return None;
    }
    if !value.contains(' ') || !value.contains('-') {
        return None;
    }
    let token = value.split(' ').nth(1)?;
    let parts: Vec<&str> = token.split('-').collect();
    match parts.as_slice() {
        [year, month, day] => Some(format!("{day}/{month}/{year}")),
        _ => None,
    }
}

/// Rewrites every repairable string in [`ESTIMATED_DATE_COLUMN`].
///
/// Returns the number of cells corrected.
pub fn repair_dates(table: &mut ResultTable) -> usize {
    info!("Correcting date format in SAR data...");
    if !table.has_column(ESTIMATED_DATE_COLUMN) {
        debug!(column = ESTIMATED_DATE_COLUMN, "Column not present, nothing to correct");
        return 0;
    }

    let mut corrected = 0;
    for row in 0..table.len() {
        let repaired = match table.cell(row, ESTIMATED_DATE_COLUMN) {
            Value::String(text) => repair_date(text),
            _ => None,
        };
        if let Some(date) = repaired {
            table.set_cell(row, ESTIMATED_DATE_COLUMN, Value::String(date));
            corrected += 1;
        }
    }

    info!("Date correction complete. {} dates corrected", corrected);
    corrected
}
