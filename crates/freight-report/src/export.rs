//! CSV export of report rows.
//!
//! Rows are written exactly as given. Pass the pipeline's filtered and sorted
//! rows; nothing here filters or reorders them.

use std::io::Write;

use freight_model::{Accessor, FieldAccess};
use tracing::info;

use crate::error::Result;

/// Writes a header row of field names, then one row per record.
///
/// Missing values are written as empty cells. Returns the number of data
/// rows written.
pub fn write_csv<R, W: Write>(rows: &[&R], columns: &[Accessor<R>], writer: W) -> Result<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(columns.iter().map(Accessor::name))?;
    for row in rows {
        csv.write_record(
            columns
                .iter()
                .map(|column| column.get(row).unwrap_or_default().into_owned()),
        )?;
    }
    csv.flush()?;
    info!(rows = rows.len(), columns = columns.len(), "report exported");
    Ok(rows.len())
}

/// Exports every field of the record type, in accessor order.
pub fn write_csv_all<R: FieldAccess, W: Write>(rows: &[&R], writer: W) -> Result<usize> {
    write_csv(rows, &R::accessors(), writer)
}
