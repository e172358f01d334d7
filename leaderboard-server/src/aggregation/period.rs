//! Time-filtered analytics over the current cycle's eligible transactions
//!
//! A pure projection: the same aggregation as the snapshot, restricted to a
//! window resolved in the business timezone, plus a comparison against the
//! window immediately before it.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use shared::models::{CanonicalTransaction, LeaderboardEntry, TeamRegistry};
use shared::util::percentage_change;

use super::leaderboard::aggregate;
use super::money::{rounded_average, sum_whole};
use crate::utils::time::{day_start, local_date, next_day_start, parse_date};
use crate::utils::{AppError, AppResult};

const PERFORMERS: usize = 3;

/// Requested analytics range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    All,
    Today,
    Week,
    Month,
    Custom {
        start: NaiveDate,
        end: Option<NaiveDate>,
    },
}

impl TimeRange {
    /// Parse the `timeRange` / `startDate` / `endDate` query triple
    ///
    /// A custom range without a start date falls back to `All`.
    pub fn parse(range: Option<&str>, start: Option<&str>, end: Option<&str>) -> AppResult<Self> {
        fn non_blank(s: Option<&str>) -> Option<&str> {
            s.map(str::trim).filter(|s| !s.is_empty())
        }

        match non_blank(range).unwrap_or("all") {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "custom" => {
                let Some(start) = non_blank(start) else {
                    return Ok(Self::All);
                };
                let start = parse_date(start)?;
                let end = non_blank(end).map(parse_date).transpose()?;
                if let Some(end) = end
                    && end < start
                {
                    return Err(AppError::invalid_time_range(format!(
                        "End date {} is before start date {}",
                        end, start
                    )));
                }
                Ok(Self::Custom { start, end })
            }
            other => Err(AppError::invalid_time_range(format!(
                "Unknown time range: {}",
                other
            ))),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
            Self::Custom { .. } => "custom",
        }
    }

    /// Resolve against `now`; `None` means unbounded
    pub fn window(&self, now: DateTime<Utc>, tz: Tz) -> Option<Window> {
        match *self {
            Self::All => None,
            Self::Today => {
                let today = local_date(now, tz);
                Some(Window {
                    start: day_start(today, tz),
                    end: next_day_start(today, tz),
                    end_inclusive: false,
                    days: 1,
                })
            }
            Self::Week => Some(Window::trailing(now, tz, 7)),
            Self::Month => Some(Window::trailing(now, tz, 30)),
            Self::Custom { start, end } => {
                let end = end.unwrap_or(start);
                Some(Window {
                    start: day_start(start, tz),
                    end: next_day_start(end, tz),
                    end_inclusive: false,
                    days: (end - start).num_days() + 1,
                })
            }
        }
    }
}

/// Resolved time window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub end_inclusive: bool,
    /// Nominal length, used to size the comparison window
    pub days: i64,
}

impl Window {
    /// From local midnight `days` ago up to and including `now`
    fn trailing(now: DateTime<Utc>, tz: Tz, days: i64) -> Self {
        let first_day = local_date(now - Duration::days(days), tz);
        Self {
            start: day_start(first_day, tz),
            end: now,
            end_inclusive: true,
            days,
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && if self.end_inclusive { at <= self.end } else { at < self.end }
    }

    /// `[start - days, start)`
    pub fn previous(&self) -> Self {
        Self {
            start: self.start - Duration::days(self.days),
            end: self.start,
            end_inclusive: false,
            days: self.days,
        }
    }
}

/// Analytics for one time range
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub time_range: &'static str,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub total_sales: i64,
    pub total_orders: u64,
    /// Teams with at least one order in the period
    pub active_teams: u32,
    pub avg_order_value: i64,
    pub previous_sales: i64,
    pub growth_percentage: f64,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub top_performers: Vec<LeaderboardEntry>,
    pub bottom_performers: Vec<LeaderboardEntry>,
}

/// Re-aggregate `eligible` over `range`
pub fn period_report(
    registry: &TeamRegistry,
    eligible: &[CanonicalTransaction],
    range: &TimeRange,
    now: DateTime<Utc>,
    tz: Tz,
) -> PeriodReport {
    let window = range.window(now, tz);

    let current = aggregate(registry, within(eligible, window));
    let total_sales = sum_whole(current.entries.iter().map(|e| e.total_sales));
    let total_orders: u64 = current
        .entries
        .iter()
        .map(|e| u64::from(e.transaction_count))
        .sum();

    let previous_sales = match window {
        Some(window) => sum_whole(
            aggregate(registry, within(eligible, Some(window.previous())))
                .entries
                .iter()
                .map(|e| e.total_sales),
        ),
        None => 0,
    };
    let growth_percentage = if window.is_some() {
        percentage_change(total_sales as f64, previous_sales as f64)
    } else {
        0.0
    };

    let selling: Vec<&LeaderboardEntry> =
        current.entries.iter().filter(|e| e.total_sales > 0).collect();
    let top_performers = selling.iter().take(PERFORMERS).map(|e| (*e).clone()).collect();
    let mut ascending = selling.clone();
    ascending.sort_by(|a, b| a.total_sales.cmp(&b.total_sales));
    let bottom_performers = ascending
        .into_iter()
        .take(PERFORMERS)
        .cloned()
        .collect();

    PeriodReport {
        time_range: range.label(),
        start: window.map(|w| w.start),
        end: window.map(|w| w.end),
        total_sales,
        total_orders,
        active_teams: current
            .entries
            .iter()
            .filter(|e| e.transaction_count > 0)
            .count() as u32,
        avg_order_value: rounded_average(current.total, total_orders as usize),
        previous_sales,
        growth_percentage,
        leaderboard: current.entries,
        top_performers,
        bottom_performers,
    }
}

fn within(
    eligible: &[CanonicalTransaction],
    window: Option<Window>,
) -> impl Iterator<Item = &CanonicalTransaction> {
    eligible.iter().filter(move |tx| match window {
        None => true,
        Some(window) => tx.timestamp.is_some_and(|at| window.contains(at)),
    })
}
