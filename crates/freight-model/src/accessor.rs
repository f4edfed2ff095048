//! Typed field accessors.
//!
//! Reports filter and sort on fields chosen by the caller. Instead of looking
//! fields up by string at every row, the caller resolves a name once to an
//! [`Accessor`] and the pipeline calls it per record.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, Utc};

/// Reads one field of a record as text.
pub type Getter<R> = for<'a> fn(&'a R) -> Option<Cow<'a, str>>;

/// A named, typed field reader for records of type `R`.
pub struct Accessor<R> {
    name: &'static str,
    get: Getter<R>,
}

impl<R> Accessor<R> {
    pub const fn new(name: &'static str, get: Getter<R>) -> Self {
        Self { name, get }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Field value for `record`, or `None` when the record has no value.
    pub fn get<'a>(&self, record: &'a R) -> Option<Cow<'a, str>> {
        (self.get)(record)
    }
}

impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Accessor<R> {}

impl<R> fmt::Debug for Accessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Accessor").field(&self.name).finish()
    }
}

impl<R> PartialEq for Accessor<R> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Records that expose a catalog of named accessors.
pub trait FieldAccess: Sized {
    /// Every readable field, in display order.
    fn accessors() -> Vec<Accessor<Self>>;

    /// Designated "created at" timestamp used for ordering and date ranges.
    fn created_at(&self) -> Option<DateTime<Utc>>;

    /// Case-insensitive lookup of an accessor by field name.
    fn accessor(name: &str) -> Option<Accessor<Self>> {
        let wanted = name.trim();
        Self::accessors()
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(wanted))
    }

    /// Names of every readable field.
    fn field_names() -> Vec<&'static str> {
        Self::accessors().iter().map(Accessor::name).collect()
    }
}

/// Borrows a non-empty string field.
pub fn text(value: &str) -> Option<Cow<'_, str>> {
    if value.is_empty() {
        None
    } else {
        Some(Cow::Borrowed(value))
    }
}

/// Formats a numeric field with two decimals.
pub fn number(value: f64) -> Option<Cow<'static, str>> {
    Some(Cow::Owned(format!("{value:.2}")))
}

/// Formats an optional timestamp as RFC 3339.
pub fn timestamp(value: Option<DateTime<Utc>>) -> Option<Cow<'static, str>> {
    value.map(|ts| Cow::Owned(ts.to_rfc3339()))
}
