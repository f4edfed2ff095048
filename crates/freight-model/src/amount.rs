//! Monetary amounts as they arrive from the API.
//!
//! The API sends currency either as JSON numbers or as formatted strings
//! (`"$1,250.00"`). Unparseable values become zero so one bad row never
//! blocks a report.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A currency or rate amount that deserializes leniently.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Amount(pub f64);

impl Amount {
    pub const ZERO: Amount = Amount(0.0);

    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
    Null(()),
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawAmount::deserialize(deserializer)?;
        Ok(match raw {
            RawAmount::Number(value) if value.is_finite() => Amount(value),
            RawAmount::Number(_) | RawAmount::Null(()) => Amount::ZERO,
            RawAmount::Text(text) => Amount(parse_amount(&text)),
        })
    }
}

/// Parses a formatted currency or percent string.
///
/// Strips `$`, `%`, thousands separators and whitespace. Returns 0.0 for
/// empty or unparseable input.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, '$' | '%' | ',') && !ch.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return 0.0;
    }
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_formatted_currency() {
        assert_eq!(parse_amount("$1,250.50"), 1250.5);
        assert_eq!(parse_amount(" 10 % "), 10.0);
        assert_eq!(parse_amount("-45"), -45.0);
    }

    #[test]
    fn garbage_is_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("n/a"), 0.0);
        assert_eq!(parse_amount("1.2.3"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
    }
}
