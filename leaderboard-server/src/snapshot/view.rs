//! Role-scoped dashboard views
//!
//! Admins see the whole snapshot. Students see the leaderboard rows and
//! feed rows of their own group; ranks stay global.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::models::{LeaderboardEntry, Role, Snapshot, SnapshotMetadata, TransactionView};
use shared::util::team_color_index;

/// Number of team colours the dashboard cycles through
pub const TEAM_PALETTE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopedEntry {
    #[serde(flatten)]
    pub entry: LeaderboardEntry,
    pub color_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopedTransaction {
    #[serde(flatten)]
    pub transaction: TransactionView,
    pub color_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopedView {
    pub role: Role,
    pub leaderboard: Vec<ScopedEntry>,
    pub recent_transactions: Vec<ScopedTransaction>,
    /// Global totals, not narrowed by role
    pub metadata: SnapshotMetadata,
    pub last_sync: DateTime<Utc>,
}

impl ScopedView {
    pub fn build(snapshot: &Snapshot, role: Role) -> Self {
        let leaderboard = snapshot
            .leaderboard
            .iter()
            .filter(|e| role.can_see_group(&e.group_label))
            .map(|e| ScopedEntry {
                color_index: team_color_index(&e.team_name, TEAM_PALETTE_SIZE),
                entry: e.clone(),
            })
            .collect();

        let recent_transactions = scope_feed(&snapshot.recent_transactions, &role)
            .cloned()
            .map(|t| ScopedTransaction {
                color_index: team_color_index(&t.team_name, TEAM_PALETTE_SIZE),
                transaction: t,
            })
            .collect();

        Self {
            leaderboard,
            recent_transactions,
            metadata: snapshot.metadata.clone(),
            last_sync: snapshot.last_sync,
            role,
        }
    }
}

/// Feed rows visible to `role`
pub fn scope_feed<'a>(
    feed: &'a [TransactionView],
    role: &'a Role,
) -> impl Iterator<Item = &'a TransactionView> {
    feed.iter().filter(move |t| role.can_see_group(&t.group))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::models::{Trend, UNKNOWN_TEAM};

    fn entry(name: &str, group: &str, rank: u32) -> LeaderboardEntry {
        LeaderboardEntry {
            group_label: group.into(),
            team_name: name.into(),
            account_id: format!("acc_{}", rank),
            member_first_names: vec![],
            total_sales: 100 * i64::from(10 - rank),
            transaction_count: 1,
            avg_order_value: 0,
            trend: Trend::Stable,
            last_transaction: None,
            rank,
        }
    }

    fn view(team: &str, group: &str) -> TransactionView {
        TransactionView {
            team_name: team.into(),
            group: group.into(),
            account_id: None,
            amount: 10.0,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            payment_id: "p".into(),
            status: "paid".into(),
            event_type: "order.paid".into(),
        }
    }

    fn snapshot() -> Snapshot {
        let leaderboard = vec![entry("Chai Co", "A", 1), entry("Momo Hub", "B", 2), entry("Dosa Den", "A", 3)];
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        Snapshot {
            metadata: SnapshotMetadata::from_leaderboard(&leaderboard, at),
            leaderboard,
            recent_transactions: vec![view("Chai Co", "A"), view("Momo Hub", "B"), view(UNKNOWN_TEAM, "")],
            last_sync: at,
        }
    }

    #[test]
    fn test_admin_sees_everything() {
        let scoped = ScopedView::build(&snapshot(), Role::Admin);
        assert_eq!(scoped.leaderboard.len(), 3);
        assert_eq!(scoped.recent_transactions.len(), 3);
    }

    #[test]
    fn test_student_sees_own_group_with_global_ranks() {
        let role = Role::Student { group: Some("A".into()) };
        let scoped = ScopedView::build(&snapshot(), role);
        let ranks: Vec<u32> = scoped.leaderboard.iter().map(|e| e.entry.rank).collect();
        assert_eq!(ranks, vec![1, 3]);
        assert_eq!(scoped.recent_transactions.len(), 1);
        assert_eq!(scoped.recent_transactions[0].transaction.team_name, "Chai Co");
        assert_eq!(scoped.metadata.active_teams, 3);
    }

    #[test]
    fn test_student_without_group_sees_nothing() {
        let scoped = ScopedView::build(&snapshot(), Role::Student { group: None });
        assert!(scoped.leaderboard.is_empty());
        assert!(scoped.recent_transactions.is_empty());
    }

    #[test]
    fn test_color_index_is_stable_and_flattened() {
        let a = ScopedView::build(&snapshot(), Role::Admin);
        let b = ScopedView::build(&snapshot(), Role::Admin);
        assert_eq!(a.leaderboard[0].color_index, b.leaderboard[0].color_index);
        assert!(a.leaderboard.iter().all(|e| e.color_index < TEAM_PALETTE_SIZE));

        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["leaderboard"][0]["teamName"], "Chai Co");
        assert!(json["leaderboard"][0]["colorIndex"].is_u64());
        assert_eq!(json["role"]["type"], "admin");
    }
}
