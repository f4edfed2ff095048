//! Filter predicates for report views.
//!
//! A [`FilterSpec`] is a plain value rebuilt by the caller whenever a filter
//! changes. Every predicate that is not set passes.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use freight_model::{Accessor, StatusGroup, normalize_status};

/// Caller-supplied predicate over a record.
pub type Predicate<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;

/// Status predicate.
pub enum StatusFilter<R> {
    /// Field value must normalize to one of `accepted`. An empty list passes.
    OneOf {
        accessor: Accessor<R>,
        accepted: Vec<String>,
    },
    Custom(Predicate<R>),
}

impl<R> StatusFilter<R> {
    /// Accepts `value` and every spelling in its status group, so filtering on
    /// `approved` also keeps `answered` and `accountant_approved` records.
    pub fn group(accessor: Accessor<R>, value: &str) -> Self {
        let wanted = normalize_status(value);
        let mut accepted = Vec::new();
        if !wanted.is_empty() {
            let group = StatusGroup::classify(&wanted);
            accepted.extend(group.equivalents().iter().map(|s| (*s).to_string()));
            if !accepted.contains(&wanted) {
                accepted.push(wanted);
            }
        }
        Self::OneOf { accessor, accepted }
    }

    /// Accepts `value` alone.
    pub fn exact(accessor: Accessor<R>, value: &str) -> Self {
        let wanted = normalize_status(value);
        let accepted = if wanted.is_empty() {
            Vec::new()
        } else {
            vec![wanted]
        };
        Self::OneOf { accessor, accepted }
    }

    pub fn custom(predicate: impl Fn(&R) -> bool + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(predicate))
    }

    pub fn is_active(&self) -> bool {
        match self {
            Self::OneOf { accepted, .. } => !accepted.is_empty(),
            Self::Custom(_) => true,
        }
    }

    pub fn matches(&self, record: &R) -> bool {
        match self {
            Self::OneOf { accessor, accepted } => {
                if accepted.is_empty() {
                    return true;
                }
                accessor
                    .get(record)
                    .is_some_and(|value| accepted.contains(&normalize_status(&value)))
            }
            Self::Custom(predicate) => predicate(record),
        }
    }
}

impl<R> Clone for StatusFilter<R> {
    fn clone(&self) -> Self {
        match self {
            Self::OneOf { accessor, accepted } => Self::OneOf {
                accessor: *accessor,
                accepted: accepted.clone(),
            },
            Self::Custom(predicate) => Self::Custom(Arc::clone(predicate)),
        }
    }
}

impl<R> fmt::Debug for StatusFilter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneOf { accessor, accepted } => f
                .debug_struct("OneOf")
                .field("accessor", accessor)
                .field("accepted", accepted)
                .finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Inclusive calendar-day range, compared in UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Only a range with both bounds filters anything.
    pub fn is_active(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn contains(&self, timestamp: Option<DateTime<Utc>>) -> bool {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return true;
        };
        timestamp.is_some_and(|ts| {
            let day = ts.date_naive();
            start <= day && day <= end
        })
    }
}

/// The complete set of active criteria for one report view.
pub struct FilterSpec<R> {
    pub search_text: String,
    pub search_fields: Vec<Accessor<R>>,
    pub status: Option<StatusFilter<R>>,
    pub date_range: Option<DateRange>,
    /// Field equality filters, see [`FilterSpec::equals`].
    pub equals: Vec<(Accessor<R>, String)>,
}

impl<R> FilterSpec<R> {
    pub fn new() -> Self {
        Self {
            search_text: String::new(),
            search_fields: Vec::new(),
            status: None,
            date_range: None,
            equals: Vec::new(),
        }
    }

    #[must_use]
    pub fn search(mut self, text: impl Into<String>, fields: Vec<Accessor<R>>) -> Self {
        self.search_text = text.into();
        self.search_fields = fields;
        self
    }

    #[must_use]
    pub fn status(mut self, status: StatusFilter<R>) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.date_range = Some(DateRange::new(start, end));
        self
    }

    /// Requires the field to equal `value`, ignoring surrounding whitespace
    /// and ASCII case. When both sides are numbers they compare by value, so
    /// `1000` matches a line haul shown as `1000.00`.
    #[must_use]
    pub fn equals(mut self, accessor: Accessor<R>, value: impl Into<String>) -> Self {
        self.equals.push((accessor, value.into()));
        self
    }

    /// Whether any predicate would reject a record.
    pub fn is_active(&self) -> bool {
        !self.search_text.trim().is_empty()
            || self.status.as_ref().is_some_and(StatusFilter::is_active)
            || self.date_range.is_some_and(|range| range.is_active())
            || self.equals.iter().any(|(_, value)| !value.trim().is_empty())
    }

    pub(crate) fn matches_status(&self, record: &R) -> bool {
        self.status.as_ref().is_none_or(|status| status.matches(record))
    }

    /// Case-insensitive substring match on any search field.
    ///
    /// Empty search text always matches; a non-empty search with no fields
    /// configured matches nothing.
    pub(crate) fn matches_text(&self, record: &R) -> bool {
        let needle = self.search_text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.search_fields.iter().any(|accessor| {
            accessor
                .get(record)
                .is_some_and(|value| value.to_lowercase().contains(&needle))
        })
    }

    pub(crate) fn matches_date(&self, timestamp: Option<DateTime<Utc>>) -> bool {
        self.date_range.is_none_or(|range| range.contains(timestamp))
    }

    /// Every equality filter holds. Empty expected values pass.
    pub(crate) fn matches_equals(&self, record: &R) -> bool {
        self.equals.iter().all(|(accessor, expected)| {
            let expected = expected.trim();
            expected.is_empty()
                || accessor
                    .get(record)
                    .is_some_and(|value| values_equal(value.trim(), expected))
        })
    }
}

impl<R> Default for FilterSpec<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for FilterSpec<R> {
    fn clone(&self) -> Self {
        Self {
            search_text: self.search_text.clone(),
            search_fields: self.search_fields.clone(),
            status: self.status.clone(),
            date_range: self.date_range,
            equals: self.equals.clone(),
        }
    }
}

impl<R> fmt::Debug for FilterSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterSpec")
            .field("search_text", &self.search_text)
            .field("search_fields", &self.search_fields)
            .field("status", &self.status)
            .field("date_range", &self.date_range)
            .field("equals", &self.equals)
            .finish()
    }
}

fn values_equal(actual: &str, expected: &str) -> bool {
    if actual.eq_ignore_ascii_case(expected) {
        return true;
    }
    match (plain_number(actual), plain_number(expected)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// A number with optional `$`, `%` and thousands separators. Anything else,
/// including the empty string, is not a number.
fn plain_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|ch| !matches!(ch, '$' | '%' | ',') && !ch.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use freight_model::{CallRecord, FieldAccess};

    fn call(status: &str) -> CallRecord {
        CallRecord {
            status: status.to_string(),
            ..CallRecord::default()
        }
    }

    #[test]
    fn status_group_accepts_equivalent_spellings() {
        let status = CallRecord::accessor("status").unwrap();
        let filter = StatusFilter::group(status, "Approved");
        assert!(filter.matches(&call("answered")));
        assert!(filter.matches(&call("Accountant Approved")));
        assert!(!filter.matches(&call("rejected")));
        assert!(!filter.matches(&call("")));

        let exact = StatusFilter::exact(status, "approved");
        assert!(!exact.matches(&call("answered")));
    }

    #[test]
    fn empty_status_value_is_inactive() {
        let filter = StatusFilter::group(CallRecord::accessor("status").unwrap(), "  ");
        assert!(!filter.is_active());
        assert!(filter.matches(&call("anything")));
    }

    #[test]
    fn equality_compares_numbers_by_value() {
        assert!(values_equal("1000.00", "1000"));
        assert!(values_equal("1250.50", "$1,250.5"));
        assert!(values_equal("Jo Smith", "jo smith"));
        assert!(!values_equal("1000.00", "1000.01"));
        assert!(!values_equal("n/a", "0"));
        assert!(!values_equal("inf", "infinity"));
    }

    #[test]
    fn half_open_range_does_not_filter() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1);
        let ts = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).single();
        assert!(DateRange::new(day, None).contains(ts));
        assert!(DateRange::new(None, day).contains(None));

        let closed = DateRange::new(day, day);
        assert!(closed.is_active());
        assert!(!closed.contains(ts));
        assert!(!closed.contains(None));
        let same_day = Utc.with_ymd_and_hms(2024, 3, 1, 23, 59, 59).single();
        assert!(closed.contains(same_day));
    }
}
