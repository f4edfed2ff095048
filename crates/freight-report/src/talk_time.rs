//! Call duration normalization.
//!
//! Agents log talk time by hand in mixed formats (`"2h 30m"`, `"2.5h"`,
//! `"90m"`, `"45"`). Everything is converted to fractional hours.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

static HOURS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*h").expect("Invalid hours regex"));
static MINUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*m").expect("Invalid minutes regex"));

/// Bare numbers below this are minutes; at or above it they are hours.
pub const BARE_MINUTES_LIMIT: f64 = 100.0;

fn component(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Parses one talk-time value into hours. Unparseable input yields 0.
pub fn parse_talk_time_hours(raw: &str) -> f64 {
    let text = raw.trim().to_lowercase();
    if text.is_empty() {
        return 0.0;
    }
    let hours = component(&HOURS, &text);
    let minutes = component(&MINUTES, &text);
    let parsed = match (hours, minutes) {
        (None, None) => match text.parse::<f64>() {
            Ok(bare) if bare < BARE_MINUTES_LIMIT => Some(bare / 60.0),
            Ok(bare) => Some(bare),
            Err(_) => None,
        },
        (h, m) => Some(h.unwrap_or(0.0) + m.unwrap_or(0.0) / 60.0),
    };
    match parsed {
        Some(value) if value.is_finite() && value >= 0.0 => value,
        _ => {
            warn!(value = raw, "unreadable talk time counted as zero");
            0.0
        }
    }
}

/// Sum of talk times in hours.
pub fn total_talk_time_hours<'a>(values: impl IntoIterator<Item = &'a str>) -> f64 {
    values.into_iter().map(parse_talk_time_hours).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_formats() {
        assert_eq!(parse_talk_time_hours("2h 30m"), 2.5);
        assert_eq!(parse_talk_time_hours("2.5h"), 2.5);
        assert_eq!(parse_talk_time_hours("90m"), 1.5);
        assert_eq!(parse_talk_time_hours("45"), 0.75);
        assert_eq!(parse_talk_time_hours("2 hrs 15 mins"), 2.25);
    }

    #[test]
    fn bare_numbers_switch_to_hours_at_one_hundred() {
        assert_eq!(parse_talk_time_hours("99"), 99.0 / 60.0);
        assert_eq!(parse_talk_time_hours("100"), 100.0);
        assert_eq!(parse_talk_time_hours("150"), 150.0);
    }

    #[test]
    fn garbage_is_zero() {
        assert_eq!(parse_talk_time_hours(""), 0.0);
        assert_eq!(parse_talk_time_hours("n/a"), 0.0);
        assert_eq!(parse_talk_time_hours("-5"), 0.0);
        assert_eq!(parse_talk_time_hours("NaN"), 0.0);
    }
}
