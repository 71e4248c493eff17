//! Business-rule validation.

use engdocs_core::{is_blank, ResultTable, Schema};
use serde_json::Value;
use tracing::info;

/// Column receiving validation messages.
pub const ERROR_COLUMN: &str = "errorMsg";

/// Column holding the DTR status.
pub const STATUS_COLUMN: &str = "dtrStatus";

/// Statuses that require a submittal date.
const SUBMITTED_STATUSES: &[&str] = &["Submitted", "Approved"];

/// Flags rows whose status requires a submittal date that is missing.
///
/// Always ensures [`ERROR_COLUMN`] exists, with empty strings for rows that
/// had no value. The rule itself only runs when the schema names a submittal
/// column and both it and [`STATUS_COLUMN`] are present. Returns the number
/// of rows flagged.
pub fn validate(table: &mut ResultTable, schema: Schema) -> usize {
    if !table.has_column(ERROR_COLUMN) {
        table.add_column(ERROR_COLUMN);
        for row in 0..table.len() {
            table.set_cell(row, ERROR_COLUMN, Value::String(String::new()));
        }
    }

    let Some(date_column) = schema.submittal_date_column() else {
        return 0;
    };
    if !table.has_column(STATUS_COLUMN) || !table.has_column(date_column) {
        return 0;
    }

    let message = format!("{date_column} empty and {STATUS_COLUMN} in (Submitted, Approved)");
    let mut flagged = 0;
    for row in 0..table.len() {
        let submitted = table
            .cell(row, STATUS_COLUMN)
            .as_str()
            .is_some_and(|status| SUBMITTED_STATUSES.contains(&status));
        if submitted && is_blank(table.cell(row, date_column)) {
            table.set_cell(row, ERROR_COLUMN, Value::String(message.clone()));
            flagged += 1;
        }
    }

    if flagged > 0 {
        info!(
            "Data validation ({}): Found {} rows with missing {}",
            schema, flagged, date_column
        );
    }
    flagged
}

#[cfg(test)]
mod tests {
    use super::*;
    use engdocs_core::{assemble, RecordBatch};
    use serde_json::json;

    fn table(rows: &serde_json::Value) -> ResultTable {
        assemble([&RecordBatch::from_value(rows)])
    }

    #[test]
    fn test_gtp_rule() {
        let mut t = table(&json!([
            {"dtrStatus": "Submitted", "submittalDate": null},
            {"dtrStatus": "Approved", "submittalDate": ""},
            {"dtrStatus": "Approved", "submittalDate": "01/01/2024"},
            {"dtrStatus": "Draft", "submittalDate": null},
        ]));

        assert_eq!(validate(&mut t, Schema::Gtp), 2);
        let msgs: Vec<_> = t.column_values(ERROR_COLUMN).cloned().collect();
        let flagged = json!("submittalDate empty and dtrStatus in (Submitted, Approved)");
        assert_eq!(msgs, vec![flagged.clone(), flagged, json!(""), json!("")]);
    }

    #[test]
    fn test_dtr_rule_uses_gtp_submittal_date() {
        let mut t = table(&json!([{"dtrStatus": "Submitted", "submittalDate": null}]));
        assert_eq!(validate(&mut t, Schema::Dtr), 0);

        let mut t = table(&json!([{"dtrStatus": "Submitted", "gtpSubmittalDate": null}]));
        assert_eq!(validate(&mut t, Schema::Dtr), 1);
        assert_eq!(
            t.cell(0, ERROR_COLUMN),
            &json!("gtpSubmittalDate empty and dtrStatus in (Submitted, Approved)")
        );
    }

    #[test]
    fn test_error_column_always_present() {
        let mut t = table(&json!([{"a": 1}]));
        assert_eq!(validate(&mut t, Schema::Sar), 0);
        assert_eq!(t.columns(), ["a", "errorMsg"]);
        assert_eq!(t.cell(0, ERROR_COLUMN), &json!(""));
    }

    #[test]
    fn test_existing_messages_kept() {
        let mut t = table(&json!([{"errorMsg": "upstream", "dtrStatus": "Draft", "submittalDate": null}]));
        validate(&mut t, Schema::Gtp);
        assert_eq!(t.cell(0, ERROR_COLUMN), &json!("upstream"));
    }
}
