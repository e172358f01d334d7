//! Money helpers using rust_decimal for exact sums
//!
//! Amounts arrive as `f64`; they are accumulated as `Decimal` and rounded
//! once at the end so totals never drift with the number of rows.

use rust_decimal::prelude::*;

/// `Some` only for finite values inside the `Decimal` range
#[inline]
pub fn checked_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value)
}

/// Convert f64 to Decimal, unrepresentable values become zero
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    checked_decimal(value).unwrap_or_default()
}

/// Exact sum of `amounts`, saturating at the `Decimal` bounds
pub fn sum_amounts<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = f64>,
{
    amounts.into_iter().map(to_decimal).fold(Decimal::ZERO, |acc, amount| {
        acc.checked_add(amount).unwrap_or_else(|| {
            tracing::warn!(%acc, %amount, "Amount sum overflowed, saturating");
            if amount.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            }
        })
    })
}

/// Sum of whole-unit totals, saturating at the `i64` bounds
pub fn sum_whole<I>(totals: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    totals.into_iter().fold(0, i64::saturating_add)
}

/// Round to whole currency units, midpoint away from zero
///
/// Values beyond the `i64` range saturate.
#[inline]
pub fn round_whole(value: Decimal) -> i64 {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// `round(sum / count)`, 0 when count is 0
pub fn rounded_average(sum: Decimal, count: usize) -> i64 {
    if count == 0 {
        return 0;
    }
    round_whole(sum / Decimal::from(count))
}
