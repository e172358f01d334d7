//! Aggregation: per-team metrics, ranking and period analytics
//!
//! - [`leaderboard`] - totals, averages and dense ranks
//! - [`trend`] - recent vs previous order value heuristic
//! - [`period`] - time-filtered re-aggregation
//! - [`money`] - decimal accumulation and rounding

pub mod leaderboard;
pub mod money;
pub mod period;
pub mod trend;

pub use leaderboard::{Aggregation, aggregate};
pub use period::{PeriodReport, TimeRange, Window, period_report};
