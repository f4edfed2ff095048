//! Importable target fields.
//!
//! A [`FieldCatalog`] is the fixed list of database fields an upload can be
//! mapped onto. It is static for the duration of one import session.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// One importable target field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Unique identifier, as the API expects it.
    pub field: String,
    /// Human-readable label.
    pub label: String,
    /// Whether an import must map a column to this field.
    #[serde(default)]
    pub required: bool,
}

impl FieldDescriptor {
    pub fn new(field: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            required: false,
        }
    }

    pub fn required(field: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            required: true,
            ..Self::new(field, label)
        }
    }
}

/// Ordered list of field descriptors with unique identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldCatalog {
    fields: Vec<FieldDescriptor>,
}

impl FieldCatalog {
    /// Builds a catalog, rejecting empty or duplicate identifiers.
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self> {
        let mut seen = std::collections::BTreeSet::new();
        for field in &fields {
            if field.field.trim().is_empty() {
                return Err(ModelError::EmptyFieldIdentifier);
            }
            if !seen.insert(field.field.as_str()) {
                return Err(ModelError::DuplicateField(field.field.clone()));
            }
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.field == field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn required(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.required)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }
}

impl<'a> IntoIterator for &'a FieldCatalog {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Field identifiers of the delivery-order import schema.
pub mod delivery_order {
    pub const WORK_ORDER_NO: &str = "workOrderNo";
    pub const CUSTOMER_NAME: &str = "customerName";
    pub const BILL_TO: &str = "billTo";
    pub const CARRIER_NAME: &str = "carrierName";
    pub const EQUIPMENT_TYPE: &str = "equipmentType";
    pub const LINE_HAUL: &str = "lineHaul";
    pub const FSC: &str = "fsc";
    pub const OTHER: &str = "other";
    pub const TOTAL_CARRIER_FEES: &str = "totalCarrierFees";
    pub const ORIGIN_CITY: &str = "originCity";
    pub const ORIGIN_STATE: &str = "originState";
    pub const ORIGIN_ZIP: &str = "originZip";
    pub const ORIGIN_WEIGHT: &str = "originWeight";
    pub const ORIGIN_PICKUP_DATE: &str = "originPickupDate";
    pub const ORIGIN_REMARKS: &str = "originRemarks";
    pub const DESTINATION_CITY: &str = "destinationCity";
    pub const DESTINATION_STATE: &str = "destinationState";
    pub const DESTINATION_ZIP: &str = "destinationZip";
    pub const DESTINATION_WEIGHT: &str = "destinationWeight";
    pub const DESTINATION_DROP_DATE: &str = "destinationDropDate";
    pub const DESTINATION_REMARKS: &str = "destinationRemarks";
    pub const CONTAINER_NO: &str = "containerNo";
    pub const SHIPMENT_NO: &str = "shipmentNo";
    pub const PO_NUMBER: &str = "poNumber";
    pub const COMMODITY: &str = "commodity";
    pub const REMARKS: &str = "remarks";
}

/// The default delivery-order import schema.
///
/// The load number is generated server-side and is not importable.
pub fn delivery_order_fields() -> FieldCatalog {
    use delivery_order as f;
    let fields = vec![
        FieldDescriptor::required(f::WORK_ORDER_NO, "Work Order Number"),
        FieldDescriptor::required(f::CUSTOMER_NAME, "Customer Name"),
        FieldDescriptor::new(f::BILL_TO, "Bill To"),
        FieldDescriptor::required(f::CARRIER_NAME, "Carrier Name"),
        FieldDescriptor::new(f::EQUIPMENT_TYPE, "Equipment Type"),
        FieldDescriptor::required(f::LINE_HAUL, "Line Haul"),
        FieldDescriptor::new(f::FSC, "FSC Percent"),
        FieldDescriptor::new(f::OTHER, "Other Charges"),
        FieldDescriptor::new(f::TOTAL_CARRIER_FEES, "Carrier Fees"),
        FieldDescriptor::required(f::ORIGIN_CITY, "Pickup City"),
        FieldDescriptor::new(f::ORIGIN_STATE, "Pickup State"),
        FieldDescriptor::new(f::ORIGIN_ZIP, "Pickup Zip"),
        FieldDescriptor::new(f::ORIGIN_WEIGHT, "Pickup Weight"),
        FieldDescriptor::new(f::ORIGIN_PICKUP_DATE, "Pickup Date"),
        FieldDescriptor::new(f::ORIGIN_REMARKS, "Pickup Remarks"),
        FieldDescriptor::required(f::DESTINATION_CITY, "Drop City"),
        FieldDescriptor::new(f::DESTINATION_STATE, "Drop State"),
        FieldDescriptor::new(f::DESTINATION_ZIP, "Drop Zip"),
        FieldDescriptor::new(f::DESTINATION_WEIGHT, "Drop Weight"),
        FieldDescriptor::new(f::DESTINATION_DROP_DATE, "Drop Date"),
        FieldDescriptor::new(f::DESTINATION_REMARKS, "Drop Remarks"),
        FieldDescriptor::new(f::CONTAINER_NO, "Container Number"),
        FieldDescriptor::new(f::SHIPMENT_NO, "Shipment Number"),
        FieldDescriptor::new(f::PO_NUMBER, "PO Number"),
        FieldDescriptor::new(f::COMMODITY, "Commodity"),
        FieldDescriptor::new(f::REMARKS, "Remarks"),
    ];
    FieldCatalog { fields }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_rejects_duplicates() {
        let err = FieldCatalog::new(vec![
            FieldDescriptor::new("a", "A"),
            FieldDescriptor::new("a", "Another A"),
        ])
        .unwrap_err();
        assert_eq!(err, ModelError::DuplicateField("a".to_string()));
    }

    #[test]
    fn default_schema_is_a_valid_catalog() {
        let catalog = delivery_order_fields();
        let rebuilt = FieldCatalog::new(catalog.fields().to_vec()).expect("valid catalog");
        assert_eq!(rebuilt.len(), catalog.len());
        assert!(catalog.required().any(|f| f.field == delivery_order::WORK_ORDER_NO));
        assert!(!catalog.get(delivery_order::REMARKS).unwrap().required);
    }
}
