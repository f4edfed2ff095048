//! Upload and feed reading for freight import and reporting.

#![deny(unsafe_code)]

pub mod error;
pub mod import;
pub mod records;
pub mod upload;

pub use error::{IngestError, Result};
pub use import::{
    DuplicateMode, DuplicatePolicy, ImportConfig, ImportPlan, ImportRow, apply_mapping,
    plan_import,
};
pub use records::{count_by_kind, load_records};
pub use upload::{
    UploadPreview, UploadTable, parse_upload, read_upload, read_upload_preview,
};
