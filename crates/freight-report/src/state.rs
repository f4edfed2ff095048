//! Serializable filter state.
//!
//! The UI or CLI holds a [`FilterState`] of plain strings. Resolving it
//! against a record type checks every field name once and yields a typed
//! [`FilterSpec`] the pipeline can run without further lookups.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use freight_model::{Accessor, FieldAccess, RecordVariant};
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};
use crate::filter::{FilterSpec, StatusFilter};
use crate::pipeline::DEFAULT_PAGE_SIZE;
use crate::stats::Reportable;

/// Report settings, usually read from the `[report]` config table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportDefaults {
    pub page_size: usize,
}

impl Default for ReportDefaults {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub search: String,
    /// Field names to search. Empty means the record type's default fields.
    pub search_fields: Vec<String>,
    /// Status value; matches every spelling in its status group.
    pub status: String,
    /// `YYYY-MM-DD`, inclusive.
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`, inclusive.
    pub end_date: Option<String>,
    /// Field name to expected value, compared as by [`FilterSpec::equals`].
    pub equals: BTreeMap<String, String>,
}

impl FilterState {
    /// Adds an equality filter from `FIELD=VALUE` text.
    pub fn push_equals(&mut self, raw: &str) -> Result<()> {
        let Some((field, value)) = raw.split_once('=') else {
            return Err(ReportError::InvalidFilter(raw.to_string()));
        };
        let field = field.trim();
        if field.is_empty() {
            return Err(ReportError::InvalidFilter(raw.to_string()));
        }
        self.equals.insert(field.to_string(), value.trim().to_string());
        Ok(())
    }

    /// Resolves field names and dates for records of type `R`.
    pub fn resolve<R: Reportable>(&self) -> Result<FilterSpec<R>> {
        let names: Vec<&str> = if self.search_fields.is_empty() {
            R::SEARCH_FIELDS.to_vec()
        } else {
            self.search_fields.iter().map(String::as_str).collect()
        };
        let search_fields = names
            .into_iter()
            .map(lookup::<R>)
            .collect::<Result<Vec<_>>>()?;

        let mut spec = FilterSpec::new().search(self.search.trim(), search_fields);
        if !self.status.trim().is_empty() {
            spec = spec.status(StatusFilter::group(lookup::<R>("status")?, &self.status));
        }
        let start = parse_date(self.start_date.as_deref())?;
        let end = parse_date(self.end_date.as_deref())?;
        if start.is_some() || end.is_some() {
            spec = spec.date_range(start, end);
        }
        for (field, value) in &self.equals {
            spec = spec.equals(lookup::<R>(field)?, value.clone());
        }
        Ok(spec)
    }
}

fn lookup<R: RecordVariant>(name: &str) -> Result<Accessor<R>> {
    <R as FieldAccess>::accessor(name).ok_or_else(|| ReportError::UnknownField {
        kind: R::KIND,
        field: name.to_string(),
        available: R::field_names().join(", "),
    })
}

fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|source| ReportError::InvalidDate {
            value: raw.to_string(),
            source,
        })
}
