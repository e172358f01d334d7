//! Leaderboard rows

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a team's recent order values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Stable,
}

/// One ranked team, rebuilt from scratch every cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    #[serde(rename = "group")]
    pub group_label: String,
    pub team_name: String,
    pub account_id: String,
    #[serde(rename = "members")]
    pub member_first_names: Vec<String>,
    /// Whole currency units
    pub total_sales: i64,
    pub transaction_count: u32,
    pub avg_order_value: i64,
    pub trend: Trend,
    pub last_transaction: Option<DateTime<Utc>>,
    /// 1-based, dense
    pub rank: u32,
}
