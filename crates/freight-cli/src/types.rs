use std::path::PathBuf;

use freight_ingest::UploadPreview;
use freight_map::{MappingSession, MissingField};
use freight_model::RecordKind;
use freight_report::Page;

/// Result of `freight map`.
#[derive(Debug)]
pub struct MapOutcome {
    pub upload: PathBuf,
    pub preview: UploadPreview,
    pub session: MappingSession,
    /// Required fields left without a column. Non-empty blocks the import.
    pub missing: Vec<MissingField>,
    pub template_saved: Option<PathBuf>,
    pub plan: Option<PlanWritten>,
}

impl MapOutcome {
    pub fn has_missing(&self) -> bool {
        !self.missing.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanWritten {
    pub path: PathBuf,
    pub create: usize,
    pub update: usize,
    pub skipped: usize,
}

/// Result of `freight report`, already rendered to strings.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutcome {
    pub kind: RecordKind,
    pub columns: Vec<String>,
    pub page: Page<Vec<String>>,
    /// The kind's stats over every filtered row.
    pub stats: serde_json::Value,
    pub exported: Option<(PathBuf, usize)>,
}
