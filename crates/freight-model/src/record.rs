//! Report records.
//!
//! Each report view works on one closed record type. [`ReportRecord`] is the
//! tagged union the API feed is decoded into; views then narrow it to the
//! variant they render.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::accessor::{Accessor, FieldAccess, number, text, timestamp};
use crate::amount::Amount;
use crate::error::ModelError;

/// Carrier entry of the CMT department report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarrierRecord {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub status: String,
    pub carrier_name: String,
    pub mc_number: String,
    pub customer_name: String,
    pub department: String,
    pub created_by: String,
    pub line_haul: Amount,
    /// Fuel surcharge as a percent of the line haul.
    pub fsc_percent: Amount,
    pub other_charges: Amount,
}

/// One logged phone call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CallRecord {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub status: String,
    pub agent: String,
    pub caller: String,
    pub phone: String,
    pub department: String,
    /// Free-form duration such as `"2h 30m"` or `"45"`.
    pub talk_time: String,
}

/// Sales target for one employee and period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TargetRecord {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub status: String,
    pub employee: String,
    pub department: String,
    pub period: String,
    pub target: Amount,
    pub achieved: Amount,
}

/// A carrier bid on a shipment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BidRecord {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub status: String,
    pub shipment_no: String,
    pub carrier_name: String,
    pub origin: String,
    pub destination: String,
    pub created_by: String,
    pub bid_rate: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportRecord {
    Carrier(CarrierRecord),
    Call(CallRecord),
    Target(TargetRecord),
    Bid(BidRecord),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Carrier,
    Call,
    Target,
    Bid,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Carrier => "carrier",
            Self::Call => "call",
            Self::Target => "target",
            Self::Bid => "bid",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "carrier" | "carriers" => Ok(Self::Carrier),
            "call" | "calls" => Ok(Self::Call),
            "target" | "targets" => Ok(Self::Target),
            "bid" | "bids" => Ok(Self::Bid),
            other => Err(ModelError::UnknownRecordKind(other.to_string())),
        }
    }
}

impl ReportRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Carrier(_) => RecordKind::Carrier,
            Self::Call(_) => RecordKind::Call,
            Self::Target(_) => RecordKind::Target,
            Self::Bid(_) => RecordKind::Bid,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Carrier(r) => &r.id,
            Self::Call(r) => &r.id,
            Self::Target(r) => &r.id,
            Self::Bid(r) => &r.id,
        }
    }
}

/// A concrete record type that can be narrowed out of a [`ReportRecord`].
pub trait RecordVariant: FieldAccess {
    const KIND: RecordKind;

    fn from_record(record: ReportRecord) -> Option<Self>;

    /// Keeps the records of this variant, preserving feed order.
    fn select(records: Vec<ReportRecord>) -> Vec<Self> {
        records.into_iter().filter_map(Self::from_record).collect()
    }
}

impl FieldAccess for CarrierRecord {
    fn accessors() -> Vec<Accessor<Self>> {
        vec![
            Accessor::new("id", |r| text(&r.id)),
            Accessor::new("createdAt", |r| timestamp(r.created_at)),
            Accessor::new("status", |r| text(&r.status)),
            Accessor::new("carrierName", |r| text(&r.carrier_name)),
            Accessor::new("mcNumber", |r| text(&r.mc_number)),
            Accessor::new("customerName", |r| text(&r.customer_name)),
            Accessor::new("department", |r| text(&r.department)),
            Accessor::new("createdBy", |r| text(&r.created_by)),
            Accessor::new("lineHaul", |r| number(r.line_haul.value())),
            Accessor::new("fscPercent", |r| number(r.fsc_percent.value())),
            Accessor::new("otherCharges", |r| number(r.other_charges.value())),
        ]
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl FieldAccess for CallRecord {
    fn accessors() -> Vec<Accessor<Self>> {
        vec![
            Accessor::new("id", |r| text(&r.id)),
            Accessor::new("createdAt", |r| timestamp(r.created_at)),
            Accessor::new("status", |r| text(&r.status)),
            Accessor::new("agent", |r| text(&r.agent)),
            Accessor::new("caller", |r| text(&r.caller)),
            Accessor::new("phone", |r| text(&r.phone)),
            Accessor::new("department", |r| text(&r.department)),
            Accessor::new("talkTime", |r| text(&r.talk_time)),
        ]
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl FieldAccess for TargetRecord {
    fn accessors() -> Vec<Accessor<Self>> {
        vec![
            Accessor::new("id", |r| text(&r.id)),
            Accessor::new("createdAt", |r| timestamp(r.created_at)),
            Accessor::new("status", |r| text(&r.status)),
            Accessor::new("employee", |r| text(&r.employee)),
            Accessor::new("department", |r| text(&r.department)),
            Accessor::new("period", |r| text(&r.period)),
            Accessor::new("target", |r| number(r.target.value())),
            Accessor::new("achieved", |r| number(r.achieved.value())),
        ]
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl FieldAccess for BidRecord {
    fn accessors() -> Vec<Accessor<Self>> {
        vec![
            Accessor::new("id", |r| text(&r.id)),
            Accessor::new("createdAt", |r| timestamp(r.created_at)),
            Accessor::new("status", |r| text(&r.status)),
            Accessor::new("shipmentNo", |r| text(&r.shipment_no)),
            Accessor::new("carrierName", |r| text(&r.carrier_name)),
            Accessor::new("origin", |r| text(&r.origin)),
            Accessor::new("destination", |r| text(&r.destination)),
            Accessor::new("createdBy", |r| text(&r.created_by)),
            Accessor::new("bidRate", |r| number(r.bid_rate.value())),
        ]
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl RecordVariant for CarrierRecord {
    const KIND: RecordKind = RecordKind::Carrier;

    fn from_record(record: ReportRecord) -> Option<Self> {
        match record {
            ReportRecord::Carrier(r) => Some(r),
            _ => None,
        }
    }
}

impl RecordVariant for CallRecord {
    const KIND: RecordKind = RecordKind::Call;

    fn from_record(record: ReportRecord) -> Option<Self> {
        match record {
            ReportRecord::Call(r) => Some(r),
            _ => None,
        }
    }
}

impl RecordVariant for TargetRecord {
    const KIND: RecordKind = RecordKind::Target;

    fn from_record(record: ReportRecord) -> Option<Self> {
        match record {
            ReportRecord::Target(r) => Some(r),
            _ => None,
        }
    }
}

impl RecordVariant for BidRecord {
    const KIND: RecordKind = RecordKind::Bid;

    fn from_record(record: ReportRecord) -> Option<Self> {
        match record {
            ReportRecord::Bid(r) => Some(r),
            _ => None,
        }
    }
}
