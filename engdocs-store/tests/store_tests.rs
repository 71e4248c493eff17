//! Integration tests for the post-collection chain.

use engdocs_core::{assemble, FatalError, RecordBatch, ResultTable, Schema};
use engdocs_store::{
    export_csv, reorder, validate, ProgramMapping, StoreError, ERROR_COLUMN, MAPPING_FILE,
};
use serde_json::json;
use tempfile::tempdir;

fn gtp_rows() -> ResultTable {
    assemble([&RecordBatch::from_value(&json!([
        {"program": "E190", "submittalDate": null, "dtrStatus": "Submitted"},
        {"program": "Phenom 300", "submittalDate": "01/02/2024", "dtrStatus": "Approved"},
        {"program": "KC-390", "submittalDate": "", "dtrStatus": "Draft"},
    ]))])
}

#[test]
fn test_missing_mapping_file_is_fatal() {
    let dir = tempdir().unwrap();
    let err = ProgramMapping::require(&dir.path().join(MAPPING_FILE)).unwrap_err();

    assert!(matches!(err, StoreError::MissingFile { .. }));
    assert_eq!(FatalError::from(err).category().code(), 1);
}

#[test]
fn test_empty_mapping_file_is_accepted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(MAPPING_FILE);
    std::fs::write(&path, "").unwrap();

    let mapping = ProgramMapping::load(&path).unwrap();
    assert!(mapping.is_empty());

    let mut table = gtp_rows();
    let stats = mapping.apply(&mut table);
    assert_eq!(stats.before, 3);
    assert_eq!(stats.mapped, 0);
    assert_eq!(table.cell(0, "program"), &json!("E190"));
}

#[test]
fn test_gtp_chain_to_csv() {
    let dir = tempdir().unwrap();
    let mapping_path = dir.path().join(MAPPING_FILE);
    std::fs::write(&mapping_path, "E190;E-Jets\nPhenom 300 ; Executive\n\nbroken line\n").unwrap();

    let mut table = gtp_rows();
    let stats = ProgramMapping::load(&mapping_path).unwrap().apply(&mut table);
    assert_eq!(stats.mapped, 2);

    assert_eq!(validate(&mut table, Schema::Gtp), 1);

    let csv_path = dir.path().join("getGTPs.csv");
    export_csv(&table, &csv_path).unwrap();

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        ["program", "submittalDate", "dtrStatus", ERROR_COLUMN]
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][0], "E-Jets");
    assert_eq!(&rows[0][1], "");
    assert_eq!(&rows[0][3], "submittalDate empty and dtrStatus in (Submitted, Approved)");
    assert_eq!(&rows[1][0], "Executive");
    assert_eq!(&rows[1][3], "");
    assert_eq!(&rows[2][0], "KC-390");

    reorder(&mut table, Schema::Gtp);
    assert_eq!(table.columns()[0], "program");
    assert_eq!(table.columns().len(), Schema::Gtp.columns().len());
    assert_eq!(table.cell(1, "program"), &json!("Executive"));
}
