use thiserror::Error;

use freight_model::RecordKind;

/// Errors raised while resolving a report request or exporting its rows.
///
/// Record contents never produce an error; malformed values degrade to zero
/// or empty instead.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{kind} records have no field named '{field}' (fields: {available})")]
    UnknownField {
        kind: RecordKind,
        field: String,
        available: String,
    },

    #[error("invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid filter '{0}': expected FIELD=VALUE")]
    InvalidFilter(String),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
