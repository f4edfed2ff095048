//! Mapped import rows and duplicate handling.

use std::collections::{BTreeMap, HashMap, HashSet};

use freight_model::{ColumnHeader, ColumnMapping};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One upload row keyed by field identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImportRow {
    values: BTreeMap<String, String>,
}

impl ImportRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Composite key over `fields`, or `None` when every part is empty.
    pub fn key(&self, fields: &[String]) -> Option<String> {
        let parts: Vec<&str> = fields
            .iter()
            .map(|field| self.get(field).unwrap_or("").trim())
            .collect();
        if parts.iter().all(|part| part.is_empty()) {
            return None;
        }
        Some(parts.join("|"))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ImportRow {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Converts upload rows to field-keyed rows.
///
/// Unmapped columns are dropped. When several columns target one field, the
/// first non-empty value in column order wins.
pub fn apply_mapping(
    headers: &[ColumnHeader],
    rows: &[Vec<String>],
    mapping: &ColumnMapping,
) -> Vec<ImportRow> {
    let targets: Vec<(usize, &str)> = headers
        .iter()
        .enumerate()
        .filter_map(|(idx, h)| mapping.field_for(&h.column_name).map(|field| (idx, field)))
        .collect();
    rows.iter()
        .map(|row| {
            let mut out = ImportRow::new();
            for &(idx, field) in &targets {
                let value = row.get(idx).map(String::as_str).unwrap_or("").trim();
                if out.get(field).is_none_or(str::is_empty) {
                    out.set(field, value);
                }
            }
            out
        })
        .collect()
}

/// What to do with a row whose key is already taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateMode {
    /// No duplicate detection.
    #[default]
    Allow,
    Skip,
    /// Replace the existing record with the uploaded row.
    Update,
}

/// Duplicate detection settings.
///
/// Which fields identify a record differs per customer, so the key is
/// configuration rather than a fixed field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicatePolicy {
    pub key: Vec<String>,
    pub mode: DuplicateMode,
}

/// The `[import]` config table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub duplicate_key: Vec<String>,
    pub duplicate_policy: DuplicateMode,
}

impl ImportConfig {
    pub fn policy(&self) -> DuplicatePolicy {
        DuplicatePolicy {
            key: self.duplicate_key.clone(),
            mode: self.duplicate_policy,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportPlan {
    pub create: Vec<ImportRow>,
    pub update: Vec<ImportRow>,
    pub skipped: Vec<ImportRow>,
}

impl ImportPlan {
    pub fn total(&self) -> usize {
        self.create.len() + self.update.len() + self.skipped.len()
    }
}

#[derive(Clone, Copy)]
enum Slot {
    Create(usize),
    Update(usize),
    Skipped,
}

/// Sorts upload rows into creates, updates and skips against `existing`.
///
/// Rows with an all-empty key are never duplicates. A key repeated inside
/// the upload is skipped under [`DuplicateMode::Skip`]; under
/// [`DuplicateMode::Update`] the later row replaces the earlier one.
pub fn plan_import(
    rows: Vec<ImportRow>,
    existing: &[ImportRow],
    policy: &DuplicatePolicy,
) -> ImportPlan {
    let mut plan = ImportPlan::default();
    if policy.mode == DuplicateMode::Allow || policy.key.is_empty() {
        plan.create = rows;
        info!(create = plan.create.len(), "import planned without duplicate check");
        return plan;
    }

    let known: HashSet<String> = existing
        .iter()
        .filter_map(|row| row.key(&policy.key))
        .collect();
    let mut seen: HashMap<String, Slot> = HashMap::new();

    for row in rows {
        let Some(key) = row.key(&policy.key) else {
            plan.create.push(row);
            continue;
        };
        let earlier = seen.get(&key).copied();
        match (policy.mode, earlier) {
            (DuplicateMode::Update, Some(Slot::Create(idx))) => plan.create[idx] = row,
            (DuplicateMode::Update, Some(Slot::Update(idx))) => plan.update[idx] = row,
            (_, Some(_)) => {
                debug!(key = %key, "duplicate row in upload skipped");
                plan.skipped.push(row);
            }
            (DuplicateMode::Update, None) if known.contains(&key) => {
                seen.insert(key, Slot::Update(plan.update.len()));
                plan.update.push(row);
            }
            (_, None) if known.contains(&key) => {
                debug!(key = %key, "row matches an existing record");
                seen.insert(key, Slot::Skipped);
                plan.skipped.push(row);
            }
            (_, None) => {
                seen.insert(key, Slot::Create(plan.create.len()));
                plan.create.push(row);
            }
        }
    }
    info!(
        create = plan.create.len(),
        update = plan.update.len(),
        skipped = plan.skipped.len(),
        "import planned"
    );
    plan
}
