//! Ordered match rules for header-to-field resolution.
//!
//! Rules are evaluated top to bottom and the first rule scoring at or above
//! the threshold that resolves to a field wins. Scored rules come first in
//! descending score order; the domain [`PatternRule`]s follow and are only
//! reached when nothing scored matched.

use std::cmp::Reverse;

use freight_model::FieldDescriptor;
use freight_model::delivery_order as f;
use serde::{Deserialize, Serialize};

use crate::normalize::{contains_either, normalize_key};
use crate::synonyms::SynonymTable;

pub const EXACT_SCORE: u8 = 100;
pub const SYNONYM_SCORE: u8 = 80;
pub const LABEL_SCORE: u8 = 60;
pub const IDENTIFIER_SCORE: u8 = 50;
pub const PATTERN_SCORE: u8 = 50;

/// Which rule produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Synonym,
    Label,
    Identifier,
    Pattern,
}

impl MatchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Synonym => "synonym",
            Self::Label => "label",
            Self::Identifier => "identifier",
            Self::Pattern => "pattern",
        }
    }
}

/// A catalog field with its comparison keys precomputed.
#[derive(Debug, Clone)]
pub struct PreparedField {
    pub descriptor: FieldDescriptor,
    pub label_key: String,
    pub field_key: String,
}

impl PreparedField {
    pub fn new(descriptor: FieldDescriptor) -> Self {
        Self {
            label_key: normalize_key(&descriptor.label),
            field_key: normalize_key(&descriptor.field),
            descriptor,
        }
    }

    fn answers_to(&self, key: &str) -> bool {
        !key.is_empty() && (self.label_key == key || self.field_key == key)
    }
}

/// Everything a rule may consult.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub fields: &'a [PreparedField],
    pub synonyms: &'a SynonymTable,
}

/// Compound-concept rule: every group must have at least one term contained
/// in the normalized column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternRule {
    pub groups: &'static [&'static [&'static str]],
    pub target: &'static str,
}

impl PatternRule {
    pub const fn new(groups: &'static [&'static [&'static str]], target: &'static str) -> Self {
        Self { groups, target }
    }

    pub fn matches(&self, column: &str) -> bool {
        !column.is_empty()
            && self
                .groups
                .iter()
                .all(|group| group.iter().any(|term| column.contains(term)))
    }
}

const ORIGIN: &[&str] = &["origin", "pickup"];
const DESTINATION: &[&str] = &["destination", "drop"];

/// Origin, destination and load-number patterns, in evaluation order.
pub const DELIVERY_ORDER_PATTERNS: &[PatternRule] = &[
    PatternRule::new(&[ORIGIN, &["city"]], f::ORIGIN_CITY),
    PatternRule::new(&[ORIGIN, &["state"]], f::ORIGIN_STATE),
    PatternRule::new(&[ORIGIN, &["zip"]], f::ORIGIN_ZIP),
    PatternRule::new(&[ORIGIN, &["weight"]], f::ORIGIN_WEIGHT),
    PatternRule::new(&[ORIGIN, &["date"]], f::ORIGIN_PICKUP_DATE),
    PatternRule::new(&[ORIGIN, &["remarks"]], f::ORIGIN_REMARKS),
    PatternRule::new(&[DESTINATION, &["city"]], f::DESTINATION_CITY),
    PatternRule::new(&[DESTINATION, &["state"]], f::DESTINATION_STATE),
    PatternRule::new(&[DESTINATION, &["zip"]], f::DESTINATION_ZIP),
    PatternRule::new(&[DESTINATION, &["weight"]], f::DESTINATION_WEIGHT),
    PatternRule::new(&[DESTINATION, &["date"]], f::DESTINATION_DROP_DATE),
    PatternRule::new(&[DESTINATION, &["remarks"]], f::DESTINATION_REMARKS),
    // Spreadsheets call the customer's reference a "load"; the load number
    // itself is generated server-side.
    PatternRule::new(&[&["load"]], f::WORK_ORDER_NO),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchRule {
    /// Column equals a field's label or identifier.
    Exact,
    /// Column contains, or is contained by, a synonym variant of a field.
    /// The closest variant decides between fields.
    Synonym,
    /// Column contains, or is contained by, a field's label.
    LabelContainment,
    /// Column contains, or is contained by, a field's identifier.
    IdentifierContainment,
    Pattern(PatternRule),
}

impl MatchRule {
    /// The default rule order.
    pub fn default_rules() -> Vec<MatchRule> {
        let mut rules = vec![
            Self::Exact,
            Self::Synonym,
            Self::LabelContainment,
            Self::IdentifierContainment,
        ];
        rules.extend(DELIVERY_ORDER_PATTERNS.iter().cloned().map(Self::Pattern));
        rules
    }

    pub fn score(&self) -> u8 {
        match self {
            Self::Exact => EXACT_SCORE,
            Self::Synonym => SYNONYM_SCORE,
            Self::LabelContainment => LABEL_SCORE,
            Self::IdentifierContainment => IDENTIFIER_SCORE,
            Self::Pattern(_) => PATTERN_SCORE,
        }
    }

    pub fn kind(&self) -> MatchKind {
        match self {
            Self::Exact => MatchKind::Exact,
            Self::Synonym => MatchKind::Synonym,
            Self::LabelContainment => MatchKind::Label,
            Self::IdentifierContainment => MatchKind::Identifier,
            Self::Pattern(_) => MatchKind::Pattern,
        }
    }

    /// Resolves a normalized column name to a field. Containment rules take
    /// the first hit in catalog order; synonyms take the closest variant.
    pub fn resolve<'a>(&self, column: &str, ctx: RuleContext<'a>) -> Option<&'a PreparedField> {
        if column.is_empty() {
            return None;
        }
        match self {
            Self::Exact => ctx.fields.iter().find(|f| f.answers_to(column)),
            Self::Synonym => closest_synonym(column, ctx),
            Self::LabelContainment => ctx
                .fields
                .iter()
                .find(|f| contains_either(column, &f.label_key)),
            Self::IdentifierContainment => ctx
                .fields
                .iter()
                .find(|f| contains_either(column, &f.field_key)),
            Self::Pattern(rule) => {
                if !rule.matches(column) {
                    return None;
                }
                ctx.fields.iter().find(|f| f.descriptor.field == rule.target)
            }
        }
    }
}

/// How closely a synonym variant fits a column, best first when ordered
/// descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct SynonymFit {
    equal: bool,
    overlap: usize,
    closeness: Reverse<usize>,
}

impl SynonymFit {
    fn new(column: &str, variant: &str) -> Self {
        Self {
            equal: column == variant,
            overlap: column.len().min(variant.len()),
            closeness: Reverse(column.len().abs_diff(variant.len())),
        }
    }
}

/// The field owning the best-fitting variant that contains, or is contained
/// by, `column`. Equal fits go to the field earlier in the catalog.
fn closest_synonym<'a>(column: &str, ctx: RuleContext<'a>) -> Option<&'a PreparedField> {
    let mut best: Option<(SynonymFit, &'a PreparedField)> = None;
    for field in ctx.fields {
        let variants = ctx
            .synonyms
            .iter()
            .filter(|(key, _)| field.answers_to(key))
            .flat_map(|(_, variants)| variants);
        for variant in variants.filter(|v| contains_either(column, v)) {
            let fit = SynonymFit::new(column, variant);
            if best.is_none_or(|(current, _)| fit > current) {
                best = Some((fit, field));
            }
        }
    }
    best.map(|(_, field)| field)
}
