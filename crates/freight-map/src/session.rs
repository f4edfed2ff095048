//! Mapping state management for interactive import workflows.
//!
//! A [`MappingSession`] starts from the engine's suggestions and records the
//! user's corrections until the import is submitted.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use freight_model::{ColumnHeader, ColumnMapping, FieldDescriptor};
use rapidfuzz::distance::jaro_winkler;
use tracing::debug;

use crate::engine::{MappingEngine, MappingResult};
use crate::error::{ImportValidationError, MappingError};
use crate::normalize::normalize_key;
use crate::validate::validate_required;

/// Status of a column's mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnMappingStatus {
    /// Mapped by the user.
    Manual,
    /// Mapped by the engine and not touched.
    Suggested,
    /// No field.
    Unmapped,
}

/// Summary of mapping counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingSummary {
    pub total_columns: usize,
    pub mapped_columns: usize,
    pub manual_columns: usize,
    pub required_total: usize,
    pub required_mapped: usize,
}

/// A field ranked as an alternative for a column.
#[derive(Debug, Clone, PartialEq)]
pub struct Alternative {
    pub field: String,
    pub label: String,
    pub similarity: f64,
}

#[derive(Debug, Clone)]
pub struct MappingSession {
    headers: Vec<ColumnHeader>,
    fields: Vec<FieldDescriptor>,
    suggested: MappingResult,
    mapping: ColumnMapping,
    manual: BTreeSet<String>,
}

impl MappingSession {
    /// Runs the engine over the headers and starts from its suggestions.
    pub fn start(engine: &MappingEngine, headers: Vec<ColumnHeader>) -> Self {
        let suggested = engine.suggest(&headers);
        let mapping = suggested.mapping();
        Self {
            headers,
            fields: engine.fields().cloned().collect(),
            suggested,
            mapping,
            manual: BTreeSet::new(),
        }
    }

    /// Starts from a previously saved mapping, keeping only entries that
    /// still name an uploaded column and a known field.
    pub fn from_template(
        engine: &MappingEngine,
        headers: Vec<ColumnHeader>,
        template: &ColumnMapping,
    ) -> Self {
        let mut session = Self::start(engine, headers);
        for (column, field) in template.iter() {
            if let Err(error) = session.assign(column, field) {
                debug!(%error, column, field, "template entry no longer applies");
            }
        }
        session
    }

    pub fn headers(&self) -> &[ColumnHeader] {
        &self.headers
    }

    pub fn suggestions(&self) -> &MappingResult {
        &self.suggested
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h.column_name == column)
    }

    /// User correction: map `column` to `field`, replacing any previous target.
    pub fn assign(&mut self, column: &str, field: &str) -> Result<(), MappingError> {
        if !self.has_column(column) {
            return Err(MappingError::ColumnNotFound(column.to_string()));
        }
        if !self.fields.iter().any(|f| f.field == field) {
            return Err(MappingError::FieldNotFound(field.to_string()));
        }
        self.mapping.insert(column, field);
        self.manual.insert(column.to_string());
        Ok(())
    }

    /// Leaves `column` unmapped. Returns whether it had a target.
    pub fn clear(&mut self, column: &str) -> Result<bool, MappingError> {
        if !self.has_column(column) {
            return Err(MappingError::ColumnNotFound(column.to_string()));
        }
        self.manual.insert(column.to_string());
        Ok(self.mapping.remove(column).is_some())
    }

    /// Drops the user's correction and restores the engine's suggestion.
    pub fn reset(&mut self, column: &str) -> Result<(), MappingError> {
        if !self.has_column(column) {
            return Err(MappingError::ColumnNotFound(column.to_string()));
        }
        self.manual.remove(column);
        match self.suggested.get(column) {
            Some(found) => {
                self.mapping.insert(column, found.field.clone());
            }
            None => {
                self.mapping.remove(column);
            }
        }
        Ok(())
    }

    pub fn status(&self, column: &str) -> ColumnMappingStatus {
        if !self.mapping.contains_column(column) {
            ColumnMappingStatus::Unmapped
        } else if self.manual.contains(column) {
            ColumnMappingStatus::Manual
        } else {
            ColumnMappingStatus::Suggested
        }
    }

    /// Required fields no column currently targets.
    pub fn missing_required(&self) -> Vec<&FieldDescriptor> {
        self.fields
            .iter()
            .filter(|f| f.required && !self.mapping.is_field_mapped(&f.field))
            .collect()
    }

    /// Catalog fields ranked by name similarity to `column`, best first.
    ///
    /// Used to offer choices when the user corrects a mapping.
    pub fn alternatives(&self, column: &str, limit: usize) -> Vec<Alternative> {
        let key = normalize_key(column);
        let mut ranked: Vec<Alternative> = self
            .fields
            .iter()
            .map(|f| {
                let by_label =
                    jaro_winkler::similarity(key.chars(), normalize_key(&f.label).chars());
                let by_field =
                    jaro_winkler::similarity(key.chars(), normalize_key(&f.field).chars());
                Alternative {
                    field: f.field.clone(),
                    label: f.label.clone(),
                    similarity: by_label.max(by_field),
                }
            })
            .collect();
        // Stable sort keeps catalog order among equal similarities.
        ranked.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(limit);
        ranked
    }

    pub fn summary(&self) -> MappingSummary {
        let required_total = self.fields.iter().filter(|f| f.required).count();
        let required_mapped = self
            .fields
            .iter()
            .filter(|f| f.required && self.mapping.is_field_mapped(&f.field))
            .count();
        MappingSummary {
            total_columns: self.headers.len(),
            mapped_columns: self.mapping.len(),
            manual_columns: self
                .manual
                .iter()
                .filter(|c| self.mapping.contains_column(c))
                .count(),
            required_total,
            required_mapped,
        }
    }

    /// Final mapping for submission, or every missing required field.
    pub fn submit(&self) -> Result<ColumnMapping, ImportValidationError> {
        validate_required(&self.mapping, &self.fields)?;
        Ok(self.mapping.clone())
    }
}
