//! Spreadsheet upload reading.
//!
//! The first non-blank row holds the headers. Every later non-blank row is
//! data, padded or cut to the header width.

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use freight_model::ColumnHeader;
use serde::Serialize;
use tracing::debug;

use crate::error::{IngestError, Result};

/// All headers and data rows of an upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadTable {
    pub headers: Vec<ColumnHeader>,
    pub rows: Vec<Vec<String>>,
}

/// What the user sees before confirming the mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPreview {
    pub headers: Vec<ColumnHeader>,
    pub sample_rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

impl UploadTable {
    pub fn preview(&self, sample_rows: usize) -> UploadPreview {
        UploadPreview {
            headers: self.headers.clone(),
            sample_rows: self.rows.iter().take(sample_rows).cloned().collect(),
            total_rows: self.rows.len(),
        }
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.headers.iter().map(|h| h.column_name.as_str())
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Parses CSV text. An input without a non-blank row yields an empty table.
pub fn parse_upload<R: Read>(reader: R) -> std::result::Result<UploadTable, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut headers: Option<Vec<ColumnHeader>> = None;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        match &headers {
            None => {
                headers = Some(
                    record
                        .iter()
                        .enumerate()
                        .map(|(idx, name)| ColumnHeader::at(normalize_header(name), idx))
                        .collect(),
                );
            }
            Some(names) => {
                let mut row = row;
                row.resize(names.len(), String::new());
                rows.push(row);
            }
        }
    }
    Ok(UploadTable {
        headers: headers.unwrap_or_default(),
        rows,
    })
}

/// Reads a whole upload from disk.
pub fn read_upload(path: &Path) -> Result<UploadTable> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = std::fs::File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_upload(file).map_err(|source| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    })?;
    if table.headers.is_empty() {
        return Err(IngestError::EmptyUpload {
            path: path.to_path_buf(),
        });
    }
    debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "upload read"
    );
    Ok(table)
}

/// Headers plus the first `sample_rows` data rows.
pub fn read_upload_preview(path: &Path, sample_rows: usize) -> Result<UploadPreview> {
    Ok(read_upload(path)?.preview(sample_rows))
}
