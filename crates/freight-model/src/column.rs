//! Spreadsheet column headers discovered during an upload preview.

use serde::{Deserialize, Serialize};

/// One named column of an uploaded spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnHeader {
    /// Header text as it appears in the file.
    pub column_name: String,
    /// Spreadsheet letter (`A`, `B`, ..., `AA`).
    pub column_letter: String,
    /// 1-based column position.
    pub column_number: u32,
}

impl ColumnHeader {
    pub fn new(
        column_name: impl Into<String>,
        column_letter: impl Into<String>,
        column_number: u32,
    ) -> Self {
        Self {
            column_name: column_name.into(),
            column_letter: column_letter.into(),
            column_number,
        }
    }

    /// Builds a header from its 0-based position in the header row.
    pub fn at(column_name: impl Into<String>, index: usize) -> Self {
        let number = u32::try_from(index.saturating_add(1)).unwrap_or(u32::MAX);
        Self {
            column_name: column_name.into(),
            column_letter: column_letter(number),
            column_number: number,
        }
    }

    /// Builds headers for a whole header row, in order.
    pub fn from_names<I, S>(names: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| Self::at(name, idx))
            .collect()
    }
}

/// Converts a 1-based column number to its spreadsheet letter.
///
/// Returns an empty string for 0.
pub fn column_letter(number: u32) -> String {
    let mut remaining = number;
    let mut letters = Vec::new();
    while remaining > 0 {
        let rem = (remaining - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        remaining = (remaining - 1) / 26;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_roll_over_after_z() {
        assert_eq!(column_letter(1), "A");
        assert_eq!(column_letter(26), "Z");
        assert_eq!(column_letter(27), "AA");
        assert_eq!(column_letter(52), "AZ");
        assert_eq!(column_letter(703), "AAA");
        assert_eq!(column_letter(0), "");
    }

    #[test]
    fn headers_from_names_are_positional() {
        let headers = ColumnHeader::from_names(["Load Number", "Carrier Name"]);
        assert_eq!(headers[0], ColumnHeader::new("Load Number", "A", 1));
        assert_eq!(headers[1], ColumnHeader::new("Carrier Name", "B", 2));
    }
}
