use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Resolved association from spreadsheet column name to field identifier.
///
/// Keys are unique column names; a field may be the target of several columns.
/// Absence of a key means the column is unmapped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping {
    entries: BTreeMap<String, String>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `column` to `field`, replacing any previous target.
    pub fn insert(&mut self, column: impl Into<String>, field: impl Into<String>) -> Option<String> {
        self.entries.insert(column.into(), field.into())
    }

    pub fn remove(&mut self, column: &str) -> Option<String> {
        self.entries.remove(column)
    }

    pub fn field_for(&self, column: &str) -> Option<&str> {
        self.entries.get(column).map(String::as_str)
    }

    /// Columns currently targeting `field`, in column-name order.
    pub fn columns_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(_, target)| target.as_str() == field)
            .map(|(column, _)| column.as_str())
    }

    pub fn is_field_mapped(&self, field: &str) -> bool {
        self.entries.values().any(|target| target == field)
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.entries.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, f)| (c.as_str(), f.as_str()))
    }
}

impl FromIterator<(String, String)> for ColumnMapping {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<String, String>> for ColumnMapping {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }
}
