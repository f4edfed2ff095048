use std::fs;
use std::path::PathBuf;

use freight_ingest::{IngestError, read_upload, read_upload_preview};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write upload");
    path
}

#[test]
fn preview_skips_blank_rows_and_pads_short_ones() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "orders.csv",
        "\u{feff}Load Number, Carrier Name ,Total (Carrier)\n\
         ,,\n\
         WO-1,Acme Trucking,1200\n\
         WO-2,Blue Line\n\
         \n\
         WO-3,Acme Trucking,900,extra\n",
    );

    let preview = read_upload_preview(&path, 2).unwrap();
    let names: Vec<&str> = preview.headers.iter().map(|h| h.column_name.as_str()).collect();
    assert_eq!(names, vec!["Load Number", "Carrier Name", "Total (Carrier)"]);
    assert_eq!(preview.headers[2].column_letter, "C");
    assert_eq!(preview.total_rows, 3);
    assert_eq!(preview.sample_rows.len(), 2);
    assert_eq!(preview.sample_rows[1], vec!["WO-2", "Blue Line", ""]);

    let table = read_upload(&path).unwrap();
    assert_eq!(table.rows[2], vec!["WO-3", "Acme Trucking", "900"]);
}

#[test]
fn missing_and_empty_uploads_are_errors() {
    let dir = TempDir::new().unwrap();

    let missing = read_upload(&dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(missing, IngestError::FileNotFound { .. }));

    let empty = write(&dir, "empty.csv", "\n , \n");
    let err = read_upload(&empty).unwrap_err();
    assert!(matches!(err, IngestError::EmptyUpload { .. }));
    assert!(err.to_string().contains("empty.csv"));
}
