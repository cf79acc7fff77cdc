//! Report model handed to the renderer.
//!
//! Everything here is built once per run and never mutated afterwards.
//! All types derive `Serialize` so `--json` output is the model itself.

use serde::{Serialize, Serializer};
use std::fmt;

/// Artifact name used when the settlement has no text at all.
pub const EMPTY_REPORT_NAME: &str = "Error";

/// Body of the artifact produced for an empty settlement.
pub const EMPTY_REPORT_BODY: &str = "Nothing Found in PDF";

/// An exact amount with two decimal places, stored as integer cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// Serialised as a decimal string (`"72.00"`) so no precision is lost in JSON.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The five summary figures at the foot of the pay table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PayTotals {
    pub total_miles: i64,
    pub total_pay: Money,
    /// Pickup fees in whole dollars.
    pub total_pickup_fee: i64,
    pub hst: Money,
    /// Final pay rounded to whole dollars.
    pub final_pay: i64,
}

/// One row of the pay table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripRecord {
    pub pickup_location: String,
    pub delivery_location: String,
    pub miles: i64,
    pub pickups: i64,
}

impl TripRecord {
    /// "`<pickup>` to `<delivery>`", the ORDER column text.
    pub fn summary(&self) -> String {
        format!("{} to {}", self.pickup_location, self.delivery_location)
    }
}

/// Lengths of the three independently extracted trip columns.
///
/// Rows are joined by position, so the report is only trustworthy when all
/// three agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Alignment {
    pub trip_blocks: usize,
    pub pickup_counts: usize,
    pub mileages: usize,
}

impl Alignment {
    pub fn is_aligned(&self) -> bool {
        self.trip_blocks == self.pickup_counts && self.pickup_counts == self.mileages
    }

    /// Number of rows that have a value in every column.
    pub fn joined_rows(&self) -> usize {
        self.trip_blocks.min(self.pickup_counts).min(self.mileages)
    }
}

/// A fully parsed settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settlement {
    pub driver_name: String,
    pub date_range: String,
    /// Cents per mile.
    pub rate: u32,
    pub trips: Vec<TripRecord>,
    pub totals: PayTotals,
    pub alignment: Alignment,
}

/// The outcome of a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PayReport {
    /// The document had no extractable text.
    Empty,
    /// A parsed settlement ready for rendering.
    Settlement(Settlement),
}

impl PayReport {
    /// Artifact base name, without extension: `"<driver> <date range>"`, or
    /// `"Error"` for an empty document.
    pub fn artifact_name(&self) -> String {
        match self {
            PayReport::Empty => EMPTY_REPORT_NAME.to_string(),
            PayReport::Settlement(s) => format!("{} {}", s.driver_name, s.date_range),
        }
    }

    pub fn settlement(&self) -> Option<&Settlement> {
        match self {
            PayReport::Empty => None,
            PayReport::Settlement(s) => Some(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_display() {
        assert_eq!(Money::from_cents(7200).to_string(), "72.00");
        assert_eq!(Money::from_cents(936).to_string(), "9.36");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-150).to_string(), "-1.50");
        assert_eq!(Money::default().to_string(), "0.00");
    }

    #[test]
    fn money_serialises_as_string() {
        let json = serde_json::to_string(&Money::from_cents(936)).unwrap();
        assert_eq!(json, "\"9.36\"");
    }

    #[test]
    fn trip_summary() {
        let t = TripRecord {
            pickup_location: "TORONTO, ON".into(),
            delivery_location: "LAVAL, QC".into(),
            miles: 540,
            pickups: 1,
        };
        assert_eq!(t.summary(), "TORONTO, ON to LAVAL, QC");
    }

    #[test]
    fn alignment_checks() {
        let ok = Alignment {
            trip_blocks: 2,
            pickup_counts: 2,
            mileages: 2,
        };
        assert!(ok.is_aligned());
        assert_eq!(ok.joined_rows(), 2);

        let short = Alignment {
            trip_blocks: 3,
            pickup_counts: 2,
            mileages: 2,
        };
        assert!(!short.is_aligned());
        assert_eq!(short.joined_rows(), 2);
    }

    #[test]
    fn empty_report_artifact_name() {
        assert_eq!(PayReport::Empty.artifact_name(), "Error");
        assert!(PayReport::Empty.settlement().is_none());
    }

    #[test]
    fn report_json_is_tagged() {
        let json = serde_json::to_value(&PayReport::Empty).unwrap();
        assert_eq!(json["status"], "empty");
    }
}
