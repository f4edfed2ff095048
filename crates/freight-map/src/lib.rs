//! Spreadsheet column auto-mapping.
//!
//! Matches free-form upload headers onto a fixed field catalog through an
//! ordered list of scored rules, and carries the user's corrections through
//! to import submission.

#![deny(unsafe_code)]

pub mod engine;
pub mod error;
pub mod normalize;
pub mod repository;
pub mod rules;
pub mod session;
pub mod synonyms;
pub mod validate;

pub use engine::{
    ColumnMatch, ConfidenceLevel, DEFAULT_THRESHOLD, MapperConfig, MappingEngine, MappingResult,
    compute_mapping,
};
pub use error::{ImportValidationError, MappingError, MissingField};
pub use normalize::normalize_key;
pub use repository::{MappingTemplate, TemplateStore};
pub use rules::{MatchKind, MatchRule, PatternRule};
pub use session::{Alternative, ColumnMappingStatus, MappingSession, MappingSummary};
pub use synonyms::SynonymTable;
pub use validate::validate_required;
