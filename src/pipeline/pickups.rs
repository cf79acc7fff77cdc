//! Per-trip pickup counts and mileages from the pickups region.
//!
//! After the trip list the settlement itemises charges: a `MILEAGE` line for
//! every trip and a `PICKUP` line only for trips with extra stops. The two
//! columns are kept index-aligned by recording a zero pickup count whenever a
//! trip's mileage arrives without a preceding pickup line.

use crate::error::SettlementError;
use tracing::debug;

pub const PICKUP_MARKER: &str = "PICKUP";
pub const MILEAGE_MARKER: &str = "MILEAGE";

/// Token that ends the pickups region.
pub const REGION_END: &str = "DateSupplier";

/// Index-aligned pickup counts and mileages, one entry per trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickupsAndMileage {
    pub pickup_counts: Vec<i64>,
    pub mileages: Vec<i64>,
}

impl PickupsAndMileage {
    fn record_pickups(mut self, count: i64) -> Self {
        self.pickup_counts.push(count);
        self
    }

    fn record_mileage(mut self, miles: i64) -> Self {
        if self.pickup_counts.len() <= self.mileages.len() {
            self.pickup_counts.push(0);
        }
        self.mileages.push(miles);
        self
    }
}

/// Scan `region` (from the trip-list footer onwards) for pickup and mileage lines.
pub fn extract_pickups_and_mileage(
    region: &[String],
) -> Result<PickupsAndMileage, SettlementError> {
    let mut acc = PickupsAndMileage::default();

    for (i, token) in region.iter().enumerate() {
        if token == REGION_END {
            debug!("Pickups region ends at token {}", i);
            break;
        }
        if token.contains(PICKUP_MARKER) {
            acc = acc.record_pickups(quantity_after(region, i, PICKUP_MARKER)?);
        } else if token.contains(MILEAGE_MARKER) {
            acc = acc.record_mileage(quantity_after(region, i, MILEAGE_MARKER)?);
        }
    }

    debug!(
        "Extracted {} pickup counts and {} mileages",
        acc.pickup_counts.len(),
        acc.mileages.len()
    );
    Ok(acc)
}

/// The token after `region[marker]` as a whole number, truncating any fraction.
fn quantity_after(
    region: &[String],
    marker: usize,
    name: &'static str,
) -> Result<i64, SettlementError> {
    let token = region
        .get(marker + 1)
        .ok_or(SettlementError::MissingQuantity {
            marker: name,
            position: marker,
        })?;
    parse_quantity(token).ok_or_else(|| SettlementError::InvalidQuantity {
        marker: name,
        position: marker,
        token: token.clone(),
    })
}

/// Parse a decimal quantity such as `1,234.50`, truncated toward zero.
///
/// Values outside the `i64` range are rejected rather than saturated.
pub fn parse_quantity(token: &str) -> Option<i64> {
    let value: f64 = token.replace(',', "").trim().parse().ok()?;
    let whole = value.trunc();
    // i64::MIN is exactly -2^63; i64::MAX rounds up to 2^63 as f64.
    (whole >= i64::MIN as f64 && whole < i64::MAX as f64).then_some(whole as i64)
}
