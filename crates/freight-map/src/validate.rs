//! Import submission checks.

use freight_model::{ColumnMapping, FieldDescriptor};
use tracing::warn;

use crate::error::{ImportValidationError, MissingField};

/// Checks that every required field has at least one mapped column.
///
/// Reports one [`MissingField`] per unmapped required field, in schema order.
pub fn validate_required(
    mapping: &ColumnMapping,
    fields: &[FieldDescriptor],
) -> Result<(), ImportValidationError> {
    let missing: Vec<MissingField> = fields
        .iter()
        .filter(|f| f.required && !mapping.is_field_mapped(&f.field))
        .map(|f| MissingField {
            field: f.field.clone(),
            label: f.label.clone(),
        })
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    for m in &missing {
        warn!(field = %m.field, label = %m.label, "required field not mapped");
    }
    Err(ImportValidationError::MissingRequired(missing))
}
