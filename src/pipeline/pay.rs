//! Pay calculation over the extracted mileages and pickup counts.
//!
//! All amounts are integer cents. Mileage pay (`miles × cents per mile`) is
//! already exact; the two rounding steps (HST to the cent, final pay to the
//! dollar) use round-half-to-even so totals match the reference reports.

use super::pickups::PickupsAndMileage;
use crate::error::SettlementError;
use crate::output::{Money, PayTotals};

/// Rates the calculator applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayRates {
    pub cents_per_mile: u32,
    /// Whole dollars per pickup.
    pub pickup_fee: i64,
    pub hst_percent: u32,
}

/// Compute the five report totals.
///
/// # Errors
/// [`SettlementError::AmountOverflow`] when a total leaves the `i64` cents
/// range; quantities come straight from the document and are unbounded.
pub fn calculate_pay(
    trips: &PickupsAndMileage,
    rates: &PayRates,
) -> Result<PayTotals, SettlementError> {
    let total_miles = checked_sum(&trips.mileages, "total miles")?;
    let total_pickups = checked_sum(&trips.pickup_counts, "total pickups")?;
    let total_pickup_fee = overflow(
        total_pickups.checked_mul(rates.pickup_fee),
        "pickup fees",
    )?;

    let pay_cents = overflow(
        total_miles.checked_mul(i64::from(rates.cents_per_mile)),
        "mileage pay",
    )?;
    let hst_cents = div_round_half_even(
        overflow(pay_cents.checked_mul(i64::from(rates.hst_percent)), "HST")?,
        100,
    );
    let final_cents = pay_cents
        .checked_add(hst_cents)
        .zip(total_pickup_fee.checked_mul(100))
        .and_then(|(taxed, fees)| taxed.checked_add(fees));
    let final_pay = div_round_half_even(overflow(final_cents, "final pay")?, 100);

    Ok(PayTotals {
        total_miles,
        total_pay: Money::from_cents(pay_cents),
        total_pickup_fee,
        hst: Money::from_cents(hst_cents),
        final_pay,
    })
}

fn checked_sum(values: &[i64], what: &'static str) -> Result<i64, SettlementError> {
    overflow(
        values.iter().try_fold(0i64, |acc, &v| acc.checked_add(v)),
        what,
    )
}

fn overflow(value: Option<i64>, what: &'static str) -> Result<i64, SettlementError> {
    value.ok_or(SettlementError::AmountOverflow { what })
}

/// `n / d` rounded to the nearest integer, ties to even. `d` must be positive.
pub fn div_round_half_even(n: i64, d: i64) -> i64 {
    debug_assert!(d > 0);
    let q = n.div_euclid(d);
    let twice_r = 2 * n.rem_euclid(d);
    match twice_r.cmp(&d) {
        std::cmp::Ordering::Less => q,
        std::cmp::Ordering::Greater => q + 1,
        std::cmp::Ordering::Equal => q + (q & 1),
    }
}
