//! Record batches and the assembled result table.
//!
//! Upstream pages do not agree on a column set, so the table keeps the
//! union of every column it has seen (first-seen order) and treats any
//! cell a row never supplied as null.

use std::borrow::Cow;
use std::collections::HashMap;
use std::io::Write;

use serde_json::{Map, Value};

use crate::error::CoreError;

/// One record: field name to value.
pub type Record = Map<String, Value>;

/// Column name given to values that are not objects.
pub const SCALAR_COLUMN: &str = "0";

static NULL: Value = Value::Null;

// ============================================================================
// Record Batch
// ============================================================================

/// Records extracted from one page of one program.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordBatch {
    records: Vec<Record>,
}

impl RecordBatch {
    /// Creates a batch from records.
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Converts an extracted payload into rows.
    ///
    /// Arrays give one row per element, an object gives one row, and any
    /// non-object value becomes a single-column row under [`SCALAR_COLUMN`].
    /// Empty objects carry no fields and give no row.
    pub fn from_value(value: &Value) -> Self {
        let records = match value {
            Value::Null => Vec::new(),
            Value::Array(items) => items.iter().filter_map(record_from_value).collect(),
            other => record_from_value(other).into_iter().collect(),
        };
        Self { records }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the batch has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records.
    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

fn record_from_value(value: &Value) -> Option<Record> {
    match value {
        Value::Object(map) if map.is_empty() => None,
        Value::Object(map) => Some(map.clone()),
        other => {
            let mut record = Record::new();
            record.insert(SCALAR_COLUMN.to_string(), other.clone());
            Some(record)
        }
    }
}

// ============================================================================
// Result Table
// ============================================================================

/// Union of record batches for one data type.
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    /// Each row holds cells in column order; it may be shorter than
    /// `columns`, the missing tail reads as null.
    rows: Vec<Vec<Value>>,
}

impl ResultTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True if the column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Adds a column if it does not exist yet; returns its position.
    pub fn add_column(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.columns.len();
        self.columns.push(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// Appends one record as a row, extending the column set as needed.
    pub fn push_record(&mut self, record: &Record) {
        let mut row = Vec::new();
        for (name, value) in record {
            let idx = self.add_column(name);
            if row.len() <= idx {
                row.resize(idx + 1, Value::Null);
            }
            row[idx] = value.clone();
        }
        self.rows.push(row);
    }

    /// Appends every record of a batch in order.
    pub fn append_batch(&mut self, batch: &RecordBatch) {
        for record in batch.records() {
            self.push_record(record);
        }
    }

    /// Returns the cell at `row` for `column`, null when absent.
    pub fn cell(&self, row: usize, column: &str) -> &Value {
        self.index
            .get(column)
            .and_then(|&idx| self.rows.get(row).and_then(|r| r.get(idx)))
            .unwrap_or(&NULL)
    }

    /// Sets a cell, creating the column if needed.
    ///
    /// Does nothing when `row` is out of range.
    pub fn set_cell(&mut self, row: usize, column: &str, value: Value) {
        if row >= self.rows.len() {
            return;
        }
        let idx = self.add_column(column);
        let cells = &mut self.rows[row];
        if cells.len() <= idx {
            cells.resize(idx + 1, Value::Null);
        }
        cells[idx] = value;
    }

    /// Removes a column and its cells. Returns false if it did not exist.
    pub fn drop_column(&mut self, name: &str) -> bool {
        let Some(idx) = self.index.remove(name) else {
            return false;
        };
        self.columns.remove(idx);
        for row in &mut self.rows {
            if row.len() > idx {
                row.remove(idx);
            }
        }
        self.rebuild_index();
        true
    }

    /// Rearranges columns: `order` first (missing ones are created as null
    /// columns), then every other column in its current order.
    pub fn reorder(&mut self, order: &[&str]) {
        for name in order {
            self.add_column(name);
        }

        let mut new_columns: Vec<String> = order.iter().map(|s| (*s).to_string()).collect();
        new_columns.extend(
            self.columns
                .iter()
                .filter(|c| !order.contains(&c.as_str()))
                .cloned(),
        );

        let positions: Vec<usize> = new_columns.iter().map(|c| self.index[c]).collect();
        for row in &mut self.rows {
            let reordered = positions
                .iter()
                .map(|&idx| row.get(idx).cloned().unwrap_or(Value::Null))
                .collect();
            *row = reordered;
        }

        self.columns = new_columns;
        self.rebuild_index();
    }

    /// Appends all rows of `other` after this table's rows.
    pub fn concat(mut self, other: &ResultTable) -> Self {
        // Columns of `other` survive even when all their cells are null.
        for name in &other.columns {
            self.add_column(name);
        }
        for cells in &other.rows {
            let record: Record = other
                .columns
                .iter()
                .zip(cells)
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect();
            self.push_record(&record);
        }
        self
    }

    /// Values of one column, row by row.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        (0..self.rows.len()).map(move |row| self.cell(row, column))
    }

    /// Cells of one row in column order, nulls filled in.
    pub fn row_values(&self, row: usize) -> impl Iterator<Item = &Value> + '_ {
        let cells = self.rows.get(row);
        (0..self.columns.len()).map(move |idx| cells.and_then(|c| c.get(idx)).unwrap_or(&NULL))
    }

    /// Writes the table as comma-separated text with a header row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), CoreError> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(&self.columns)?;
        for row in 0..self.rows.len() {
            csv.write_record(self.row_values(row).map(|v| cell_text(v).into_owned()))?;
        }
        csv.flush()?;
        Ok(())
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();
    }
}

/// Text form of a cell: empty for null, strings verbatim, JSON otherwise.
pub fn cell_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

/// True when a cell is null or an empty string.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Union-concatenates batches into one table, rows in encounter order.
///
/// No deduplication is performed.
pub fn assemble<'a>(batches: impl IntoIterator<Item = &'a RecordBatch>) -> ResultTable {
    let mut table = ResultTable::new();
    for batch in batches {
        table.append_batch(batch);
    }
    table
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn batch(value: Value) -> RecordBatch {
        RecordBatch::from_value(&value)
    }

    #[test]
    fn test_column_union() {
        let a = batch(json!([{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]));
        let b = batch(json!([{"id": 3, "date": "2024/01/01"}]));

        let table = assemble([&a, &b]);

        assert_eq!(table.columns(), ["id", "name", "date"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.cell(0, "date"), &Value::Null);
        assert_eq!(table.cell(2, "name"), &Value::Null);
        assert_eq!(table.cell(2, "date"), &json!("2024/01/01"));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let a = batch(json!([{"id": 1}]));
        let table = assemble([&a, &a]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_from_value_shapes() {
        assert_eq!(batch(json!({"x": 1})).len(), 1);
        assert!(batch(Value::Null).is_empty());
        assert!(batch(json!([])).is_empty());

        assert!(batch(json!({})).is_empty());
        assert!(batch(json!([{}, {}])).is_empty());
        assert_eq!(batch(json!([{}, {"x": 1}])).len(), 1);

        let scalars = batch(json!(["a", "b"]));
        assert_eq!(scalars.len(), 2);
        assert_eq!(scalars.records()[0][SCALAR_COLUMN], json!("a"));
    }

    #[test]
    fn test_set_and_drop_column() {
        let mut table = assemble([&batch(json!([{"a": 1, "b": 2}, {"a": 3}]))]);

        table.set_cell(1, "errorMsg", json!("bad"));
        assert_eq!(table.cell(1, "errorMsg"), &json!("bad"));
        assert_eq!(table.cell(0, "errorMsg"), &Value::Null);

        assert!(table.drop_column("a"));
        assert!(!table.drop_column("a"));
        assert_eq!(table.columns(), ["b", "errorMsg"]);
        assert_eq!(table.cell(0, "b"), &json!(2));
        assert_eq!(table.cell(1, "errorMsg"), &json!("bad"));
    }

    #[test]
    fn test_reorder_backfills_and_keeps_extras() {
        let mut table = assemble([&batch(json!([{"extra": 1, "program": "E2"}]))]);
        table.reorder(&["program", "gtpNumber"]);

        assert_eq!(table.columns(), ["program", "gtpNumber", "extra"]);
        assert_eq!(table.cell(0, "program"), &json!("E2"));
        assert_eq!(table.cell(0, "gtpNumber"), &Value::Null);
        assert_eq!(table.cell(0, "extra"), &json!(1));
    }

    #[test]
    fn test_concat_tables() {
        let left = assemble([&batch(json!([{"id": 1, "name": "a"}]))]);
        let right = assemble([&batch(json!([{"id": 2, "kind": "TechRep"}]))]);

        let combined = left.concat(&right);
        assert_eq!(combined.len(), 2);
        assert_eq!(combined.columns(), ["id", "name", "kind"]);
        assert_eq!(combined.cell(1, "id"), &json!(2));
        assert_eq!(combined.cell(0, "kind"), &Value::Null);
    }

    #[test]
    fn test_write_csv() {
        let table = assemble([&batch(json!([
            {"id": 1, "name": "a, b"},
            {"id": 2, "tags": ["x"]}
        ]))]);

        let mut out = Vec::new();
        table.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text, "id,name,tags\n1,\"a, b\",\n2,,\"[\"\"x\"\"]\"\n");
    }
}
