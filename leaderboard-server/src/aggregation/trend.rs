//! Trend classification
//!
//! Coarse threshold heuristic: mean of the 5 newest eligible amounts
//! against the 5 before them, ±10%.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::{CanonicalTransaction, Trend};

use super::money::sum_amounts;

/// Fewer transactions than this are always `Stable`
pub const MIN_TRANSACTIONS: usize = 10;
const WINDOW: usize = 5;

const UP_FACTOR: Decimal = Decimal::from_parts(11, 0, 0, false, 1);
const DOWN_FACTOR: Decimal = Decimal::from_parts(9, 0, 0, false, 1);

/// Classify one team's eligible transactions
///
/// The gate uses the full count; the windows use only timestamped
/// transactions, newest first.
pub fn classify(transactions: &[&CanonicalTransaction]) -> Trend {
    if transactions.len() < MIN_TRANSACTIONS {
        return Trend::Stable;
    }

    let mut timed: Vec<(DateTime<Utc>, f64)> = transactions
        .iter()
        .filter_map(|tx| tx.timestamp.map(|ts| (ts, tx.amount)))
        .collect();
    if timed.len() < MIN_TRANSACTIONS {
        return Trend::Stable;
    }
    timed.sort_by(|a, b| b.0.cmp(&a.0));

    let recent = window_mean(&timed[..WINDOW]);
    let previous = window_mean(&timed[WINDOW..WINDOW * 2]);
    compare(recent, previous)
}

/// Strict comparison against the ±10% band
pub fn compare(recent_avg: Decimal, previous_avg: Decimal) -> Trend {
    let upper = previous_avg
        .checked_mul(UP_FACTOR)
        .unwrap_or(if previous_avg.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        });
    let lower = previous_avg * DOWN_FACTOR;
    if recent_avg > upper {
        Trend::Up
    } else if recent_avg < lower {
        Trend::Down
    } else {
        Trend::Stable
    }
}

fn window_mean(window: &[(DateTime<Utc>, f64)]) -> Decimal {
    sum_amounts(window.iter().map(|(_, amount)| *amount)) / Decimal::from(window.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use shared::models::{EntityKey, PaymentEventKind};

    fn tx(minutes: i64, amount: f64, timed: bool) -> CanonicalTransaction {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        CanonicalTransaction {
            entity_id: EntityKey::Gateway(format!("E{}", minutes)),
            event_type: PaymentEventKind::OrderPaid,
            status: "paid".into(),
            amount,
            timestamp: timed.then(|| base + Duration::minutes(minutes)),
            raw_timestamp: None,
            account_id: Some("acc_1".into()),
            account_email: None,
            team_name: None,
            group_label: None,
            customer_name: None,
            customer_email: None,
            order_id: None,
        }
    }

    /// Five older transactions at `previous`, five newer at `recent`
    fn series(previous: f64, recent: f64) -> Vec<CanonicalTransaction> {
        (0..10)
            .map(|i| tx(i, if i < 5 { previous } else { recent }, true))
            .collect()
    }

    fn classify_owned(txs: &[CanonicalTransaction]) -> Trend {
        let refs: Vec<&CanonicalTransaction> = txs.iter().collect();
        classify(&refs)
    }

    #[test]
    fn test_exactly_ten_percent_is_stable() {
        assert_eq!(classify_owned(&series(100.0, 110.0)), Trend::Stable);
        assert_eq!(classify_owned(&series(100.0, 90.0)), Trend::Stable);
    }

    #[test]
    fn test_above_band_is_up() {
        assert_eq!(classify_owned(&series(100.0, 111.0)), Trend::Up);
    }

    #[test]
    fn test_below_band_is_down() {
        assert_eq!(classify_owned(&series(100.0, 89.0)), Trend::Down);
    }

    #[test]
    fn test_fewer_than_ten_is_stable() {
        let txs: Vec<_> = series(100.0, 500.0).into_iter().take(9).collect();
        assert_eq!(classify_owned(&txs), Trend::Stable);
    }

    #[test]
    fn test_untimestamped_do_not_fill_windows() {
        let mut txs = series(100.0, 500.0);
        txs[0] = tx(0, 100.0, false);
        assert_eq!(classify_owned(&txs), Trend::Stable);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let mut txs = series(100.0, 200.0);
        txs.reverse();
        assert_eq!(classify_owned(&txs), Trend::Up);
    }
}
