//! Published leaderboard snapshot

use super::leaderboard::LeaderboardEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Team label used in the feed when an account is not registered
pub const UNKNOWN_TEAM: &str = "Unknown Team";

/// One row of the recent transactions feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    pub team_name: String,
    /// Empty when the account is not registered
    pub group: String,
    pub account_id: Option<String>,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
    /// Gateway entity id, empty when the record had none
    pub payment_id: String,
    pub status: String,
    pub event_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetadata {
    pub total_sales: i64,
    pub total_orders: u64,
    pub active_teams: u32,
    pub last_calculated: DateTime<Utc>,
}

impl SnapshotMetadata {
    /// Derived only from the leaderboard rows
    pub fn from_leaderboard(leaderboard: &[LeaderboardEntry], at: DateTime<Utc>) -> Self {
        Self {
            total_sales: leaderboard
                .iter()
                .map(|e| e.total_sales)
                .fold(0, i64::saturating_add),
            total_orders: leaderboard.iter().map(|e| u64::from(e.transaction_count)).sum(),
            active_teams: leaderboard.len() as u32,
            last_calculated: at,
        }
    }
}

/// The unit written to the sink, all or nothing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub recent_transactions: Vec<TransactionView>,
    pub last_sync: DateTime<Utc>,
    pub metadata: SnapshotMetadata,
}
