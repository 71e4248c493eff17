//! Integration tests for table assembly.

use engdocs_core::{assemble, RecordBatch, ResultTable};
use serde_json::{json, Value};

#[test]
fn test_assemble_preserves_encounter_order() {
    let page1 = RecordBatch::from_value(&json!([{"n": 1}, {"n": 2}]));
    let page2 = RecordBatch::from_value(&json!([{"n": 3}]));

    let table = assemble([&page1, &page2]);
    let values: Vec<&Value> = table.column_values("n").collect();
    assert_eq!(values, [&json!(1), &json!(2), &json!(3)]);
}

#[test]
fn test_column_union_nulls_unseen_cells() {
    let a = RecordBatch::from_value(&json!([{"id": 1, "name": "x"}]));
    let b = RecordBatch::from_value(&json!([{"id": 2, "date": "2024/05/01"}]));

    let table = assemble([&a, &b]);

    let mut columns: Vec<&str> = table.columns().iter().map(String::as_str).collect();
    columns.sort_unstable();
    assert_eq!(columns, ["date", "id", "name"]);
    assert!(table.cell(0, "date").is_null());
    assert!(table.cell(1, "name").is_null());
}

#[test]
fn test_empty_table() {
    let table = ResultTable::new();
    assert!(table.is_empty());
    assert!(table.cell(0, "anything").is_null());
}
