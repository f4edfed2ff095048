//! Report feed loading.

use std::path::Path;

use freight_model::{RecordKind, ReportRecord};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Reads a JSON array of `kind`-tagged report records.
pub fn load_records(path: &Path) -> Result<Vec<ReportRecord>> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<ReportRecord> =
        serde_json::from_str(&contents).map_err(|source| IngestError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), records = records.len(), "records loaded");
    Ok(records)
}

/// Counts records per kind, for a feed overview.
pub fn count_by_kind(records: &[ReportRecord]) -> Vec<(RecordKind, usize)> {
    let mut counts: Vec<(RecordKind, usize)> = Vec::new();
    for record in records {
        match counts.iter_mut().find(|(kind, _)| *kind == record.kind()) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.kind(), 1)),
        }
    }
    counts.sort_by_key(|(kind, _)| *kind);
    counts
}
