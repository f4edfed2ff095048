//! Error types for mapping operations.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Errors from interactive mapping edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Field not present in the import schema.
    #[error("Field not found: {0}")]
    FieldNotFound(String),
    /// Column not present in the uploaded file.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
}

/// A required field that no column is mapped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingField {
    pub field: String,
    pub label: String,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Required field '{}' ({}) has no mapped column",
            self.label, self.field
        )
    }
}

/// Import submission failure.
///
/// Carries every problem found, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportValidationError {
    #[error("{} required field(s) have no mapped column: {}", .0.len(), join_labels(.0))]
    MissingRequired(Vec<MissingField>),
}

impl ImportValidationError {
    /// One message per problem, in schema order.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::MissingRequired(missing) => missing.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn missing_fields(&self) -> &[MissingField] {
        match self {
            Self::MissingRequired(missing) => missing,
        }
    }
}

fn join_labels(missing: &[MissingField]) -> String {
    missing
        .iter()
        .map(|m| m.label.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
