//! Curated synonym table for spreadsheet headers.
//!
//! Each entry maps a canonical key to accepted spellings. A key resolves to a
//! field when it equals the field's normalized label or identifier, so the
//! table works against any catalog that uses the same vocabulary.

use std::collections::BTreeMap;

use crate::normalize::normalize_key;

const CURATED: &[(&str, &[&str])] = &[
    (
        "carrierfees",
        &[
            "carrierfee",
            "carriertotal",
            "totalcarrier",
            "carriercost",
            "carrierpay",
            "carrierrate",
        ],
    ),
    ("customername", &["customer", "client", "accountname"]),
    ("billto", &["billto", "billing", "invoiceto", "payer"]),
    (
        "carriername",
        &["carriercompany", "trucker", "truckingcompany", "transporter"],
    ),
    (
        "linehaul",
        &["linehaul", "baserate", "freightrate", "freightcharge", "haulrate"],
    ),
    ("fsc", &["fuelsurcharge", "fuel", "fscpercent", "fuelpercent"]),
    (
        "other",
        &["othercharges", "accessorial", "extras", "additionalcharges"],
    ),
    ("equipmenttype", &["equipment", "trailer", "trailertype"]),
    ("containerno", &["container", "containernumber", "cntr"]),
    (
        "shipmentno",
        &["shipment", "shipmentnumber", "shipmentid", "billoflading"],
    ),
    (
        "ponumber",
        &["purchaseorder", "ponum", "pono", "purchaseordernumber"],
    ),
    ("commodity", &["goods", "product", "cargo"]),
    (
        "workordernumber",
        &[
            "workorder",
            "wonumber",
            "wono",
            "ordernumber",
            "orderno",
            "referencenumber",
            "refno",
        ],
    ),
    ("pickupdate", &["shipdate", "pudate", "loaddate"]),
    ("dropdate", &["deliverydate", "deldate", "dropoffdate"]),
    ("remarks", &["notes", "comments", "instructions"]),
];

/// Canonical key to accepted variants, all normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl SynonymTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in logistics vocabulary.
    pub fn curated() -> Self {
        let mut table = Self::new();
        for (key, variants) in CURATED {
            table.extend(key, variants.iter().copied());
        }
        table
    }

    /// Adds variants under `key`. Both key and variants are normalized;
    /// empty variants are ignored.
    pub fn extend<I, S>(&mut self, key: &str, variants: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let key = normalize_key(key);
        if key.is_empty() {
            return;
        }
        let entry = self.entries.entry(key).or_default();
        for variant in variants {
            let variant = normalize_key(variant.as_ref());
            if !variant.is_empty() && !entry.contains(&variant) {
                entry.push(variant);
            }
        }
    }

    /// Variants registered for a normalized key.
    pub fn variants(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curated_table_is_normalized() {
        let table = SynonymTable::curated();
        for (key, variants) in table.iter() {
            assert_eq!(key, normalize_key(key));
            for variant in variants {
                assert_eq!(variant, &normalize_key(variant));
            }
        }
        assert!(table.variants("carrierfees").contains(&"totalcarrier".to_string()));
    }

    #[test]
    fn extend_normalizes_and_dedupes() {
        let mut table = SynonymTable::new();
        table.extend("Carrier Fees", ["Carrier $", "carrier", "CARRIER", ""]);
        assert_eq!(table.variants("carrierfees"), ["carrier".to_string()]);
    }
}
