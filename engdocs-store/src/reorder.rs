//! Export column order.

use engdocs_core::{ResultTable, Schema};
use tracing::debug;

/// Puts the schema's columns first, creating missing ones as null, and keeps
/// every other column after them in its current order.
///
/// Schemas without a fixed column list leave the table unchanged.
pub fn reorder(table: &mut ResultTable, schema: Schema) {
    let order = schema.columns();
    if order.is_empty() {
        return;
    }
    let missing = order.iter().filter(|c| !table.has_column(c)).count();
    debug!(schema = %schema, missing, "Reordering columns");
    table.reorder(order);
}
