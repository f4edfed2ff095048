/// Normalizes a header, label or identifier for comparison.
///
/// Lowercases and drops every character outside `a-z` and `0-9`, so
/// `"Total (Carrier)"` becomes `"totalcarrier"`.
pub fn normalize_key(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_lowercase)
        .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit())
        .collect()
}

/// Containment in either direction. Empty keys never match.
pub(crate) fn contains_either(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_everything_but_ascii_alphanumerics() {
        assert_eq!(normalize_key("Total (Carrier)"), "totalcarrier");
        assert_eq!(normalize_key("  Work_Order-No. #2 "), "workorderno2");
        assert_eq!(normalize_key("Café"), "caf");
        assert_eq!(normalize_key("(%)"), "");
    }

    #[test]
    fn containment_is_symmetric_and_rejects_empty() {
        assert!(contains_either("totalcarrier", "carrier"));
        assert!(contains_either("fee", "carrierfee"));
        assert!(!contains_either("", "carrier"));
        assert!(!contains_either("origin", "drop"));
    }
}
