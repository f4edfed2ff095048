//! Report data pipeline: filter, stable sort, paginate and summarize.

#![deny(unsafe_code)]

pub mod aggregate;
pub mod charges;
pub mod error;
pub mod export;
pub mod filter;
pub mod pipeline;
pub mod state;
pub mod stats;
pub mod talk_time;

pub use aggregate::{aggregate, aggregate_sum, total};
pub use charges::Charges;
pub use error::{ReportError, Result};
pub use export::{write_csv, write_csv_all};
pub use filter::{DateRange, FilterSpec, Predicate, StatusFilter};
pub use freight_model::parse_amount;
pub use pipeline::{
    DEFAULT_PAGE_SIZE, Page, PageRequest, ReportPipeline, ReportView, TimestampFn, paginate,
    total_pages,
};
pub use state::{FilterState, ReportDefaults};
pub use stats::{BidStats, CallStats, CarrierStats, Reportable, StatusCounts, TargetStats};
pub use talk_time::{parse_talk_time_hours, total_talk_time_hours};
