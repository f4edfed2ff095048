//! Summary counters shown above each report table.
//!
//! Stats are always computed from the filtered rows so the counters agree
//! with what the table shows.

use std::fmt;

use freight_model::{
    BidRecord, CallRecord, CarrierRecord, RecordVariant, StatusGroup, TargetRecord,
};
use serde::Serialize;

use crate::aggregate::{aggregate, total};
use crate::charges::Charges;
use crate::talk_time::parse_talk_time_hours;

/// A record type with a report view of its own.
pub trait Reportable: RecordVariant + Serialize {
    type Stats: Serialize + fmt::Debug + Clone + PartialEq;

    /// Fields searched when the caller names none.
    const SEARCH_FIELDS: &'static [&'static str];

    fn summarize(rows: &[&Self]) -> Self::Stats;
}

/// Records per status group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub approved: usize,
    pub rejected: usize,
    pub pending: usize,
    pub other: usize,
}

impl StatusCounts {
    fn count<'a, R: 'a>(rows: impl IntoIterator<Item = &'a R>, status: fn(&R) -> &str) -> Self {
        let groups = aggregate(rows, |r| StatusGroup::classify(status(r)));
        let get = |group| groups.get(&group).copied().unwrap_or(0);
        Self {
            approved: get(StatusGroup::Approved),
            rejected: get(StatusGroup::Rejected),
            pending: get(StatusGroup::Pending),
            other: get(StatusGroup::Other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierStats {
    pub total: usize,
    pub statuses: StatusCounts,
    pub line_haul: f64,
    pub fuel_surcharge: f64,
    pub other_charges: f64,
    /// Line haul plus computed surcharge plus extras.
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallStats {
    pub total: usize,
    /// Calls in the approved group (`answered` and friends).
    pub answered: usize,
    /// Calls in the rejected group (`missed` and friends).
    pub missed: usize,
    pub talk_time_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetStats {
    pub total: usize,
    pub target: f64,
    pub achieved: f64,
    /// `achieved / target * 100`, or 0 without a target.
    pub achievement_percent: f64,
    pub met: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BidStats {
    pub total: usize,
    pub statuses: StatusCounts,
    pub bid_rate_total: f64,
    pub accepted_rate_total: f64,
}

impl Reportable for CarrierRecord {
    type Stats = CarrierStats;
    const SEARCH_FIELDS: &'static [&'static str] =
        &["carrierName", "mcNumber", "customerName", "createdBy"];

    fn summarize(rows: &[&Self]) -> CarrierStats {
        let rows = rows.iter().copied();
        CarrierStats {
            total: rows.len(),
            statuses: StatusCounts::count(rows.clone(), |r| &r.status),
            line_haul: total(rows.clone(), |r| Charges::from(r).line_haul),
            fuel_surcharge: total(rows.clone(), |r| Charges::from(r).fuel_surcharge()),
            other_charges: total(rows.clone(), |r| Charges::from(r).other),
            total_amount: total(rows, |r| Charges::from(r).total()),
        }
    }
}

impl Reportable for CallRecord {
    type Stats = CallStats;
    const SEARCH_FIELDS: &'static [&'static str] = &["agent", "caller", "phone", "department"];

    fn summarize(rows: &[&Self]) -> CallStats {
        let statuses = StatusCounts::count(rows.iter().copied(), |r| &r.status);
        CallStats {
            total: rows.len(),
            answered: statuses.approved,
            missed: statuses.rejected,
            talk_time_hours: total(rows.iter().copied(), |r| {
                parse_talk_time_hours(&r.talk_time)
            }),
        }
    }
}

impl Reportable for TargetRecord {
    type Stats = TargetStats;
    const SEARCH_FIELDS: &'static [&'static str] = &["employee", "department", "period"];

    fn summarize(rows: &[&Self]) -> TargetStats {
        let target = total(rows.iter().copied(), |r| r.target.value());
        let achieved = total(rows.iter().copied(), |r| r.achieved.value());
        let achievement_percent = if target > 0.0 {
            achieved / target * 100.0
        } else {
            0.0
        };
        TargetStats {
            total: rows.len(),
            target,
            achieved,
            achievement_percent,
            met: rows
                .iter()
                .filter(|r| r.target.value() > 0.0 && r.achieved.value() >= r.target.value())
                .count(),
        }
    }
}

impl Reportable for BidRecord {
    type Stats = BidStats;
    const SEARCH_FIELDS: &'static [&'static str] = &[
        "shipmentNo",
        "carrierName",
        "origin",
        "destination",
        "createdBy",
    ];

    fn summarize(rows: &[&Self]) -> BidStats {
        let accepted = rows
            .iter()
            .copied()
            .filter(|r| StatusGroup::classify(&r.status) == StatusGroup::Approved);
        BidStats {
            total: rows.len(),
            statuses: StatusCounts::count(rows.iter().copied(), |r| &r.status),
            bid_rate_total: total(rows.iter().copied(), |r| r.bid_rate.value()),
            accepted_rate_total: total(accepted, |r| r.bid_rate.value()),
        }
    }
}
