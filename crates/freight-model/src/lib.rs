#![deny(unsafe_code)]

pub mod accessor;
pub mod amount;
pub mod column;
pub mod error;
pub mod field;
pub mod mapping;
pub mod record;
pub mod status;

pub use accessor::{Accessor, FieldAccess, Getter};
pub use amount::{Amount, parse_amount};
pub use column::{ColumnHeader, column_letter};
pub use error::{ModelError, Result};
pub use field::{FieldCatalog, FieldDescriptor, delivery_order, delivery_order_fields};
pub use mapping::ColumnMapping;
pub use record::{
    BidRecord, CallRecord, CarrierRecord, RecordKind, RecordVariant, ReportRecord, TargetRecord,
};
pub use status::{StatusGroup, normalize_status};
