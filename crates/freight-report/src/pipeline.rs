//! Filter, sort and paginate.
//!
//! Every operation is a pure function of its inputs: records are borrowed,
//! never mutated, and each call allocates a fresh output.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use freight_model::FieldAccess;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::filter::FilterSpec;
use crate::stats::Reportable;

/// Rows per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Reads the timestamp a pipeline sorts and date-filters on.
pub type TimestampFn<R> = fn(&R) -> Option<DateTime<Utc>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// 1-based.
    pub page_number: usize,
    pub page_size: usize,
}

impl PageRequest {
    /// Page numbers below 1 and page sizes below 1 are raised to 1.
    pub fn new(page_number: usize, page_size: usize) -> Self {
        Self {
            page_number: page_number.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn first(page_size: usize) -> Self {
        Self::new(1, page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// One page of a collection.
///
/// `start_index` is `(page_number - 1) * page_size` whether or not the
/// collection reaches that far; `end_index` is `start_index` plus the number
/// of items shown. A page past the end is empty with both indices past
/// `total_items`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }
}

/// `max(1, ceil(count / page_size))`.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Slices one page out of `items`. Never fails for an out-of-range page.
pub fn paginate<T: Clone>(items: &[T], request: PageRequest) -> Page<T> {
    let request = PageRequest::new(request.page_number, request.page_size);
    let count = items.len();
    let start_index = (request.page_number - 1).saturating_mul(request.page_size);
    let slice_start = start_index.min(count);
    let slice_end = slice_start.saturating_add(request.page_size).min(count);
    let items = items[slice_start..slice_end].to_vec();
    let end_index = start_index.saturating_add(items.len());
    Page {
        items,
        page_number: request.page_number,
        page_size: request.page_size,
        total_pages: total_pages(count, request.page_size),
        start_index,
        end_index,
        total_items: count,
    }
}

/// Output of one filter, sort and paginate pass.
#[derive(Debug, Clone)]
pub struct ReportView<'a, R: Reportable> {
    /// Every filtered row in display order, for export.
    pub rows: Vec<&'a R>,
    pub page: Page<&'a R>,
    /// Computed over all filtered rows, not just the page.
    pub stats: R::Stats,
}

/// Filter, sort and paginate over records of type `R`.
pub struct ReportPipeline<R> {
    timestamp: TimestampFn<R>,
}

impl<R> Clone for ReportPipeline<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for ReportPipeline<R> {}

impl<R> fmt::Debug for ReportPipeline<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportPipeline").finish_non_exhaustive()
    }
}

impl<R: FieldAccess> ReportPipeline<R> {
    /// Pipeline keyed on the record's `created_at`.
    pub fn new() -> Self {
        Self {
            timestamp: R::created_at,
        }
    }
}

impl<R: FieldAccess> Default for ReportPipeline<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ReportPipeline<R> {
    /// Pipeline keyed on a different timestamp.
    pub fn with_timestamp(timestamp: TimestampFn<R>) -> Self {
        Self { timestamp }
    }

    /// Keeps records passing every active predicate, in input order.
    ///
    /// Predicates run in order: status, free text, date range, field equality.
    pub fn filter<'a>(&self, records: &'a [R], spec: &FilterSpec<R>) -> Vec<&'a R> {
        let kept: Vec<&R> = records
            .iter()
            .filter(|r| spec.matches_status(r))
            .filter(|r| spec.matches_text(r))
            .filter(|r| spec.matches_date((self.timestamp)(r)))
            .filter(|r| spec.matches_equals(r))
            .collect();
        debug!(input = records.len(), kept = kept.len(), "records filtered");
        kept
    }

    /// Stable sort, newest first. Records without a timestamp go last.
    pub fn sort<'a>(&self, mut records: Vec<&'a R>) -> Vec<&'a R> {
        records.sort_by(|a, b| newest_first((self.timestamp)(a), (self.timestamp)(b)));
        records
    }

    /// Filters, sorts and paginates, and summarizes the filtered rows.
    pub fn run<'a>(
        &self,
        records: &'a [R],
        spec: &FilterSpec<R>,
        request: PageRequest,
    ) -> ReportView<'a, R>
    where
        R: Reportable,
    {
        let rows = self.sort(self.filter(records, spec));
        let page = paginate(&rows, request);
        let stats = R::summarize(&rows);
        debug!(
            rows = rows.len(),
            page = page.page_number,
            total_pages = page.total_pages,
            "report view built"
        );
        ReportView { rows, page, stats }
    }
}

fn newest_first(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_three_rows_in_pages_of_nine() {
        let rows: Vec<usize> = (0..23).collect();

        let first = paginate(&rows, PageRequest::new(1, 9));
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items, (0..9).collect::<Vec<_>>());
        assert_eq!((first.start_index, first.end_index), (0, 9));

        let last = paginate(&rows, PageRequest::new(3, 9));
        assert_eq!(last.items, (18..23).collect::<Vec<_>>());
        assert_eq!((last.start_index, last.end_index), (18, 23));
        assert!(!last.has_next());

        let past = paginate(&rows, PageRequest::new(4, 9));
        assert!(past.is_empty());
        assert_eq!(past.total_pages, 3);
        assert_eq!((past.start_index, past.end_index), (27, 27));
    }

    #[test]
    fn empty_collection_has_one_page() {
        let page = paginate::<u8>(&[], PageRequest::new(0, 0));
        assert_eq!(page.page_number, 1);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.is_empty());
    }

    #[test]
    fn undated_records_sort_last() {
        let ts = DateTime::from_timestamp(1_700_000_000, 0);
        assert_eq!(newest_first(ts, None), Ordering::Less);
        assert_eq!(newest_first(None, ts), Ordering::Greater);
        assert_eq!(newest_first(None, None), Ordering::Equal);
    }
}
