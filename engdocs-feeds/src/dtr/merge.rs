//! Finished-date merge for DTR tables.

use engdocs_core::ResultTable;
use serde_json::Value;
use tracing::info;

/// Column kept after the merge.
pub const FINISHED_DATE_COLUMN: &str = "gtpFinishedDate";

/// Column folded into [`FINISHED_DATE_COLUMN`] and then dropped.
pub const GRTP_FINISHED_DATE_COLUMN: &str = "grtpFinishedDate";

/// Fills null finished dates from `grtpFinishedDate`, then drops that column.
///
/// Does nothing unless both columns exist. Returns the number of cells filled.
pub fn merge_finished_dates(table: &mut ResultTable) -> usize {
    if !table.has_column(FINISHED_DATE_COLUMN) || !table.has_column(GRTP_FINISHED_DATE_COLUMN) {
        return 0;
    }

    info!("Merging {} fields...", FINISHED_DATE_COLUMN);
    let mut filled = 0;
    for row in 0..table.len() {
        if !table.cell(row, FINISHED_DATE_COLUMN).is_null() {
            continue;
        }
        let fallback = table.cell(row, GRTP_FINISHED_DATE_COLUMN);
        if fallback.is_null() {
            continue;
        }
        let value: Value = fallback.clone();
        table.set_cell(row, FINISHED_DATE_COLUMN, value);
        filled += 1;
    }

    info!("Removing {} column...", GRTP_FINISHED_DATE_COLUMN);
    table.drop_column(GRTP_FINISHED_DATE_COLUMN);
    filled
}
