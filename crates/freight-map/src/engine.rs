//! Mapping engine implementation.

use std::collections::BTreeMap;

use freight_model::{ColumnHeader, ColumnMapping, FieldDescriptor};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::normalize::normalize_key;
use crate::rules::{EXACT_SCORE, MatchKind, MatchRule, PreparedField, RuleContext, SYNONYM_SCORE};
use crate::synonyms::SynonymTable;

/// Minimum score (out of 100) for a column to be mapped.
pub const DEFAULT_THRESHOLD: u8 = 50;

/// Confidence level categories for mapping quality assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    /// Accepted but only through containment or a pattern; worth a look.
    Low,
    /// Synonym match.
    Medium,
    /// Exact label or identifier match.
    High,
}

impl ConfidenceLevel {
    pub fn from_score(score: u8) -> Self {
        if score >= EXACT_SCORE {
            Self::High
        } else if score >= SYNONYM_SCORE {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "high confidence - likely correct",
            Self::Medium => "medium confidence - should review",
            Self::Low => "low confidence - needs verification",
        }
    }
}

/// Tunables for the engine, usually read from the `[mapper]` config table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Minimum accepted score.
    pub threshold: u8,
    /// Extra synonym variants, keyed by canonical key.
    pub synonyms: BTreeMap<String, Vec<String>>,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            synonyms: BTreeMap::new(),
        }
    }
}

/// One accepted column-to-field match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMatch {
    pub column: String,
    pub field: String,
    pub score: u8,
    pub rule: MatchKind,
}

impl ColumnMatch {
    pub fn level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_score(self.score)
    }
}

/// Result of a mapping operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingResult {
    /// Accepted matches, in header order.
    pub matches: Vec<ColumnMatch>,
    /// Columns that no rule resolved above the threshold, in header order.
    pub unmapped_columns: Vec<String>,
}

impl MappingResult {
    /// The plain column-to-field mapping.
    pub fn mapping(&self) -> ColumnMapping {
        self.matches
            .iter()
            .map(|m| (m.column.clone(), m.field.clone()))
            .collect()
    }

    pub fn get(&self, column: &str) -> Option<&ColumnMatch> {
        self.matches.iter().find(|m| m.column == column)
    }

    #[must_use]
    pub fn count_by_level(&self) -> BTreeMap<ConfidenceLevel, usize> {
        let mut counts = BTreeMap::new();
        for m in &self.matches {
            *counts.entry(m.level()).or_insert(0) += 1;
        }
        counts
    }

    #[must_use]
    pub fn mean_score(&self) -> Option<f32> {
        if self.matches.is_empty() {
            return None;
        }
        let sum: f32 = self.matches.iter().map(|m| f32::from(m.score)).sum();
        Some(sum / self.matches.len() as f32)
    }
}

/// Engine for mapping spreadsheet columns onto catalog fields.
///
/// Each header is matched independently, so the result for a column does not
/// depend on which other columns were uploaded or in which order.
///
/// # Example
///
/// ```
/// use freight_map::MappingEngine;
/// use freight_model::{ColumnHeader, FieldDescriptor};
///
/// let fields = vec![FieldDescriptor::new("carrierName", "Carrier Name")];
/// let engine = MappingEngine::new(&fields);
/// let result = engine.suggest(&ColumnHeader::from_names(["Carrier Name", "Notes"]));
/// assert_eq!(result.mapping().field_for("Carrier Name"), Some("carrierName"));
/// assert_eq!(result.unmapped_columns, vec!["Notes".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct MappingEngine {
    fields: Vec<PreparedField>,
    synonyms: SynonymTable,
    rules: Vec<MatchRule>,
    threshold: u8,
}

impl MappingEngine {
    /// Engine with the curated synonyms, default rules and threshold.
    pub fn new(fields: &[FieldDescriptor]) -> Self {
        Self::with_config(fields, &MapperConfig::default())
    }

    pub fn with_config(fields: &[FieldDescriptor], config: &MapperConfig) -> Self {
        let mut synonyms = SynonymTable::curated();
        for (key, variants) in &config.synonyms {
            synonyms.extend(key, variants);
        }
        Self {
            fields: fields.iter().cloned().map(PreparedField::new).collect(),
            synonyms,
            rules: MatchRule::default_rules(),
            threshold: config.threshold,
        }
    }

    /// Replaces the rule list. Rules are evaluated in the given order.
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<MatchRule>) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn with_synonyms(mut self, synonyms: SynonymTable) -> Self {
        self.synonyms = synonyms;
        self
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().map(|f| &f.descriptor)
    }

    /// Best match for one column name, or `None` below the threshold.
    pub fn match_column(&self, column_name: &str) -> Option<ColumnMatch> {
        let normalized = normalize_key(column_name);
        if normalized.is_empty() {
            return None;
        }
        let ctx = RuleContext {
            fields: &self.fields,
            synonyms: &self.synonyms,
        };
        self.rules
            .iter()
            .filter(|rule| rule.score() >= self.threshold)
            .find_map(|rule| {
                rule.resolve(&normalized, ctx).map(|field| ColumnMatch {
                    column: column_name.to_string(),
                    field: field.descriptor.field.clone(),
                    score: rule.score(),
                    rule: rule.kind(),
                })
            })
    }

    /// Suggests a field for every header.
    pub fn suggest(&self, headers: &[ColumnHeader]) -> MappingResult {
        let mut result = MappingResult::default();
        for header in headers {
            match self.match_column(&header.column_name) {
                Some(found) => {
                    debug!(
                        column = %header.column_name,
                        letter = %header.column_letter,
                        field = %found.field,
                        score = found.score,
                        rule = found.rule.as_str(),
                        "column mapped"
                    );
                    result.matches.push(found);
                }
                None => {
                    debug!(
                        column = %header.column_name,
                        letter = %header.column_letter,
                        "column left unmapped"
                    );
                    result.unmapped_columns.push(header.column_name.clone());
                }
            }
        }
        info!(
            columns = headers.len(),
            mapped = result.matches.len(),
            unmapped = result.unmapped_columns.len(),
            "column mapping suggested"
        );
        result
    }
}

/// Maps headers onto fields with the default engine.
pub fn compute_mapping(headers: &[ColumnHeader], fields: &[FieldDescriptor]) -> ColumnMapping {
    MappingEngine::new(fields).suggest(headers).mapping()
}
