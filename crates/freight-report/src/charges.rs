//! Customer charge arithmetic.

use freight_model::{CarrierRecord, parse_amount};
use serde::Serialize;

/// Line haul, fuel surcharge percent and flat extras for one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Charges {
    pub line_haul: f64,
    /// Percent of the line haul, not a currency amount.
    pub fsc_percent: f64,
    pub other: f64,
}

impl Charges {
    pub fn new(line_haul: f64, fsc_percent: f64, other: f64) -> Self {
        Self {
            line_haul,
            fsc_percent,
            other,
        }
    }

    /// Builds charges from user-entered text such as `"$1,000"` and `"10%"`.
    pub fn parse(line_haul: &str, fsc_percent: &str, other: &str) -> Self {
        Self::new(
            parse_amount(line_haul),
            parse_amount(fsc_percent),
            parse_amount(other),
        )
    }

    pub fn fuel_surcharge(&self) -> f64 {
        self.line_haul * (self.fsc_percent / 100.0)
    }

    /// Line haul plus computed surcharge plus extras.
    pub fn total(&self) -> f64 {
        self.line_haul + self.fuel_surcharge() + self.other
    }
}

impl From<&CarrierRecord> for Charges {
    fn from(record: &CarrierRecord) -> Self {
        Self::new(
            record.line_haul.value(),
            record.fsc_percent.value(),
            record.other_charges.value(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surcharge_is_a_percent_of_line_haul() {
        let charges = Charges::new(1000.0, 10.0, 50.0);
        assert_eq!(charges.fuel_surcharge(), 100.0);
        assert_eq!(charges.total(), 1150.0);
    }

    #[test]
    fn parses_formatted_input() {
        let charges = Charges::parse("$1,000.00", "10%", "fifty");
        assert_eq!(charges.total(), 1100.0);
    }
}
