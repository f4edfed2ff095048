//! Status vocabulary shared by the report types.
//!
//! Departments record the same outcome under different words: a call is
//! `answered`, a bid is `accepted`, an order is `accountant_approved`. The
//! groups below fold those spellings together.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const APPROVED: &[&str] = &[
    "approved",
    "accountant_approved",
    "answered",
    "accepted",
    "completed",
];
const REJECTED: &[&str] = &[
    "rejected",
    "accountant_rejected",
    "declined",
    "missed",
    "cancelled",
];
const PENDING: &[&str] = &["pending", "in_review", "open", "submitted"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusGroup {
    Approved,
    Rejected,
    Pending,
    Other,
}

impl StatusGroup {
    /// Classifies a raw status value, case-insensitively.
    pub fn classify(status: &str) -> Self {
        let key = normalize_status(status);
        if APPROVED.contains(&key.as_str()) {
            Self::Approved
        } else if REJECTED.contains(&key.as_str()) {
            Self::Rejected
        } else if PENDING.contains(&key.as_str()) {
            Self::Pending
        } else {
            Self::Other
        }
    }

    /// Raw status spellings that belong to this group.
    pub fn equivalents(self) -> &'static [&'static str] {
        match self {
            Self::Approved => APPROVED,
            Self::Rejected => REJECTED,
            Self::Pending => PENDING,
            Self::Other => &[],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Pending => "pending",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for StatusGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusGroup {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::classify(s))
    }
}

/// Lowercases and joins words with `_` so `"Accountant Approved"` and
/// `"accountant-approved"` compare equal to `accountant_approved`.
pub fn normalize_status(status: &str) -> String {
    status
        .trim()
        .to_lowercase()
        .split(|ch: char| ch.is_whitespace() || ch == '-' || ch == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
