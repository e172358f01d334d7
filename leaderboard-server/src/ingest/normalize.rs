//! Event normalizer
//!
//! Maps [`RawPaymentEvent`]s into [`CanonicalTransaction`]s and sorts them
//! into sales candidates (amount and status present) and feed records
//! (event type and parsed timestamp present). A record may be both.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use shared::models::{CanonicalTransaction, EntityKey, PaymentEventKind, RawPaymentEvent};

use crate::aggregation::money::checked_decimal;
use crate::utils::time::local_to_utc;

/// Epoch values at or above this are milliseconds
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// Why a record was dropped entirely
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No amount/status for sales and no event type/timestamp for the feed
    NoPaymentSignal,
}

/// Per-record issues seen while normalizing one table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    pub records: usize,
    pub sales_candidates: usize,
    pub feed_records: usize,
    pub rejected: usize,
    pub malformed_amounts: usize,
    pub unparsed_timestamps: usize,
    pub missing_ids: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub sales_candidates: Vec<CanonicalTransaction>,
    /// Not deduplicated; feed shows every delivery
    pub feed_records: Vec<CanonicalTransaction>,
    pub stats: NormalizeStats,
}

/// Stateless normalizer bound to the business timezone
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    tz: Tz,
}

impl Normalizer {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn normalize(&self, events: &[RawPaymentEvent]) -> Normalized {
        let mut out = Normalized::default();
        out.stats.records = events.len();

        for (index, event) in events.iter().enumerate() {
            let (tx, sales, feed) = match self.normalize_one(index, event, &mut out.stats) {
                Ok(classified) => classified,
                Err(Rejection::NoPaymentSignal) => {
                    out.stats.rejected += 1;
                    tracing::debug!(row = index, reason = "NoPaymentSignal", "Rejected payment record");
                    continue;
                }
            };
            if feed {
                out.stats.feed_records += 1;
                out.feed_records.push(tx.clone());
            }
            if sales {
                out.stats.sales_candidates += 1;
                out.sales_candidates.push(tx);
            }
        }

        out
    }

    /// Returns the canonical record plus (is sales candidate, is feed record)
    fn normalize_one(
        &self,
        index: usize,
        event: &RawPaymentEvent,
        stats: &mut NormalizeStats,
    ) -> Result<(CanonicalTransaction, bool, bool), Rejection> {
        let timestamp = event
            .timestamp
            .as_deref()
            .and_then(|raw| parse_timestamp(raw, self.tz));
        if event.timestamp.is_some() && timestamp.is_none() {
            stats.unparsed_timestamps += 1;
            tracing::debug!(row = index, raw = ?event.timestamp, "Unparseable timestamp");
        }

        let sales = event.amount.is_some() && event.status.is_some();
        let feed = event.event_type.is_some() && timestamp.is_some();
        if !sales && !feed {
            return Err(Rejection::NoPaymentSignal);
        }

        let amount = match event.amount.as_deref() {
            Some(raw) => parse_amount(raw).unwrap_or_else(|| {
                stats.malformed_amounts += 1;
                tracing::warn!(
                    row = index,
                    entity_id = ?event.entity_id,
                    raw_amount = %raw,
                    "MalformedRecord: amount is not a representable number, using 0"
                );
                0.0
            }),
            None => 0.0,
        };

        let entity_id = match &event.entity_id {
            Some(id) => EntityKey::Gateway(id.clone()),
            None => {
                stats.missing_ids += 1;
                EntityKey::Row(index)
            }
        };

        let tx = CanonicalTransaction {
            entity_id,
            event_type: PaymentEventKind::parse(event.event_type.as_deref().unwrap_or_default()),
            status: event.status.clone().unwrap_or_default(),
            amount,
            timestamp,
            raw_timestamp: event.timestamp.clone(),
            account_id: event.account_id.clone(),
            account_email: event.account_email.clone(),
            team_name: None,
            group_label: None,
            customer_name: event.customer_name.clone(),
            customer_email: event.customer_email.clone(),
            order_id: event.order_id.clone(),
        };
        Ok((tx, sales, feed))
    }
}

/// Parse an amount cell
///
/// `None` for unparseable values and for values outside the range exact
/// money arithmetic can hold.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| checked_decimal(*v).is_some())
}

/// Parse a timestamp cell into UTC
///
/// Tried in order: RFC 3339, ISO-style date/time without zone, epoch
/// seconds or milliseconds, then `MM/DD/YYYY[ HH:MM[:SS]]`. Zone-less
/// values are interpreted in `tz`.
pub fn parse_timestamp(raw: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(local_to_utc(naive, tz));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(local_to_utc(date.and_time(NaiveTime::MIN), tz));
    }

    if let Ok(epoch) = raw.parse::<i64>() {
        return if epoch.abs() >= EPOCH_MILLIS_THRESHOLD {
            DateTime::from_timestamp_millis(epoch)
        } else {
            DateTime::from_timestamp(epoch, 0)
        };
    }

    parse_us_datetime(raw).map(|naive| local_to_utc(naive, tz))
}

/// `MM/DD/YYYY` with an optional `HH:MM[:SS]` part
fn parse_us_datetime(raw: &str) -> Option<NaiveDateTime> {
    let mut parts = raw.split_whitespace();
    let date_part = parts.next()?;
    let time_part = parts.next();
    if parts.next().is_some() {
        return None;
    }

    let date_fields: Vec<u32> = date_part
        .split('/')
        .map(|f| f.parse().ok())
        .collect::<Option<_>>()?;
    let &[month, day, year] = date_fields.as_slice() else {
        return None;
    };
    let date = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)?;

    let time = match time_part {
        None => NaiveTime::MIN,
        Some(t) => {
            let fields: Vec<u32> = t
                .split(':')
                .map(|f| f.parse().ok())
                .collect::<Option<_>>()?;
            match *fields.as_slice() {
                [h, m] => NaiveTime::from_hms_opt(h, m, 0)?,
                [h, m, s] => NaiveTime::from_hms_opt(h, m, s)?,
                _ => return None,
            }
        }
    };
    Some(date.and_time(time))
}
