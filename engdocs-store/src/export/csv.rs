//! CSV export.

use engdocs_core::ResultTable;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

use crate::error::StoreError;

/// Writes `table` to `path`: header row, null as an empty field, strings
/// verbatim, other values as compact JSON.
pub fn export_csv(table: &ResultTable, path: &Path) -> Result<(), StoreError> {
    info!("Saving {} records to CSV file: {}", table.len(), path.display());
    let file = File::create(path)?;
    table.write_csv(BufWriter::new(file))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use engdocs_core::{assemble, RecordBatch};
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_export_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("getGTPs.csv");
        let table = assemble([&RecordBatch::from_value(&json!([
            {"program": "Jets", "count": 3},
            {"program": "São José", "flag": true},
        ]))]);

        export_csv(&table, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "program,count,flag\nJets,3,\nSão José,,true\n");
    }
}
