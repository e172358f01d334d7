//! Per-team aggregation and ranking
//!
//! Recomputed from the full eligible set on every call; nothing is patched
//! incrementally. Used for the snapshot and for period analytics alike.

use rust_decimal::Decimal;
use shared::models::{CanonicalTransaction, LeaderboardEntry, Team, TeamRegistry};
use std::collections::{BTreeSet, HashMap};

use super::money::{round_whole, rounded_average, sum_amounts};
use super::trend;

#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Ranked, one row per registry team
    pub entries: Vec<LeaderboardEntry>,
    /// Unrounded sum of every counted amount
    pub total: Decimal,
    /// Distinct account ids referenced by transactions but absent from the registry
    pub unknown_accounts: BTreeSet<String>,
    /// Transactions without any account id
    pub missing_account_refs: usize,
}

/// Aggregate eligible transactions per registry team and rank them
///
/// Teams appear in the output even with zero transactions. Transactions
/// for unknown or missing accounts are excluded and reported.
pub fn aggregate<'a, I>(registry: &TeamRegistry, eligible: I) -> Aggregation
where
    I: IntoIterator<Item = &'a CanonicalTransaction>,
{
    let mut by_account: HashMap<&str, Vec<&CanonicalTransaction>> = HashMap::new();
    let mut out = Aggregation::default();

    for tx in eligible {
        match tx.account_id.as_deref().filter(|id| !id.is_empty()) {
            None => out.missing_account_refs += 1,
            Some(id) if registry.find_by_account(id).is_none() => {
                out.unknown_accounts.insert(id.to_string());
            }
            Some(id) => by_account.entry(id).or_default().push(tx),
        }
    }

    let mut entries: Vec<LeaderboardEntry> = registry
        .teams()
        .iter()
        .map(|team| {
            let txs = by_account
                .get(team.account_id.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();
            team_entry(team, txs)
        })
        .collect();

    out.total = sum_amounts(by_account.values().flatten().map(|tx| tx.amount));

    rank(&mut entries);
    out.entries = entries;
    out
}

/// Stable sort by total descending, then dense 1-based ranks
pub fn rank(entries: &mut [LeaderboardEntry]) {
    entries.sort_by(|a, b| b.total_sales.cmp(&a.total_sales));
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = index as u32 + 1;
    }
}

fn team_entry(team: &Team, txs: &[&CanonicalTransaction]) -> LeaderboardEntry {
    let sum = sum_amounts(txs.iter().map(|tx| tx.amount));

    LeaderboardEntry {
        group_label: team.group_label.clone(),
        team_name: team.team_name.clone(),
        account_id: team.account_id.clone(),
        member_first_names: team.member_first_names.clone(),
        total_sales: round_whole(sum),
        transaction_count: txs.len() as u32,
        avg_order_value: rounded_average(sum, txs.len()),
        trend: trend::classify(txs),
        last_transaction: txs.iter().filter_map(|tx| tx.timestamp).max(),
        rank: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::models::{EntityKey, PaymentEventKind, Trend};

    fn team(account_id: &str, name: &str) -> Team {
        Team {
            account_id: account_id.into(),
            account_email: None,
            team_name: name.into(),
            group_label: "A".into(),
            member_first_names: vec![],
        }
    }

    fn tx(id: &str, account: Option<&str>, amount: f64) -> CanonicalTransaction {
        CanonicalTransaction {
            entity_id: EntityKey::Gateway(id.into()),
            event_type: PaymentEventKind::OrderPaid,
            status: "paid".into(),
            amount,
            timestamp: None,
            raw_timestamp: None,
            account_id: account.map(Into::into),
            account_email: None,
            team_name: None,
            group_label: None,
            customer_name: None,
            customer_email: None,
            order_id: None,
        }
    }

    #[test]
    fn test_ranks_by_total_descending() {
        let registry = TeamRegistry::new(vec![
            team("a", "Alpha"),
            team("b", "Beta"),
            team("c", "Gamma"),
        ]);
        let txs = vec![
            tx("1", Some("a"), 1000.0),
            tx("2", Some("b"), 500.0),
            tx("3", Some("c"), 1500.0),
        ];
        let agg = aggregate(&registry, &txs);

        let ranks: HashMap<&str, u32> = agg
            .entries
            .iter()
            .map(|e| (e.team_name.as_str(), e.rank))
            .collect();
        assert_eq!(ranks["Alpha"], 2);
        assert_eq!(ranks["Beta"], 3);
        assert_eq!(ranks["Gamma"], 1);
    }

    #[test]
    fn test_ties_keep_registry_order() {
        let registry = TeamRegistry::new(vec![team("a", "Alpha"), team("b", "Beta")]);
        let agg = aggregate(&registry, &[]);
        assert_eq!(agg.entries[0].team_name, "Alpha");
        assert_eq!(agg.entries[1].team_name, "Beta");
        let ranks: Vec<u32> = agg.entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2]);
    }

    #[test]
    fn test_zero_transaction_team() {
        let registry = TeamRegistry::new(vec![team("a", "Alpha")]);
        let agg = aggregate(&registry, &[]);
        let entry = &agg.entries[0];
        assert_eq!(entry.total_sales, 0);
        assert_eq!(entry.transaction_count, 0);
        assert_eq!(entry.avg_order_value, 0);
        assert_eq!(entry.trend, Trend::Stable);
        assert_eq!(entry.last_transaction, None);
        assert!(entry.rank >= 1);
    }

    #[test]
    fn test_sum_rounded_once() {
        let registry = TeamRegistry::new(vec![team("a", "Alpha")]);
        let txs = vec![tx("1", Some("a"), 0.4), tx("2", Some("a"), 0.4), tx("3", Some("a"), 0.4)];
        let agg = aggregate(&registry, &txs);
        // 1.2 rounds to 1; rounding each row first would give 0
        assert_eq!(agg.entries[0].total_sales, 1);
        assert_eq!(agg.entries[0].avg_order_value, 0);
    }

    #[test]
    fn test_overflowing_totals_saturate() {
        let registry = TeamRegistry::new(vec![team("a", "Alpha"), team("b", "Beta")]);
        let txs = vec![
            tx("1", Some("a"), 7e28),
            tx("2", Some("a"), 7e28),
            tx("3", Some("b"), 10.0),
        ];
        let agg = aggregate(&registry, &txs);
        assert_eq!(agg.total, Decimal::MAX);
        assert_eq!(agg.entries[0].team_name, "Alpha");
        assert_eq!(agg.entries[0].total_sales, i64::MAX);
        assert_eq!(agg.entries[1].total_sales, 10);
    }

    #[test]
    fn test_average_uses_unrounded_sum() {
        let registry = TeamRegistry::new(vec![team("a", "Alpha")]);
        let txs = vec![tx("1", Some("a"), 100.5), tx("2", Some("a"), 100.5)];
        let agg = aggregate(&registry, &txs);
        assert_eq!(agg.entries[0].total_sales, 201);
        assert_eq!(agg.entries[0].avg_order_value, 101);
    }

    #[test]
    fn test_unknown_and_missing_accounts_excluded() {
        let registry = TeamRegistry::new(vec![team("a", "Alpha")]);
        let txs = vec![
            tx("1", Some("a"), 100.0),
            tx("2", Some("ghost"), 100.0),
            tx("3", Some("ghost"), 100.0),
            tx("4", None, 100.0),
        ];
        let agg = aggregate(&registry, &txs);
        assert_eq!(agg.entries[0].total_sales, 100);
        assert_eq!(agg.unknown_accounts.len(), 1);
        assert!(agg.unknown_accounts.contains("ghost"));
        assert_eq!(agg.missing_account_refs, 1);
        assert_eq!(agg.total, Decimal::from(100));
    }

    #[test]
    fn test_last_transaction_is_max_timestamp() {
        let registry = TeamRegistry::new(vec![team("a", "Alpha")]);
        let early = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
        let mut first = tx("1", Some("a"), 1.0);
        first.timestamp = Some(late);
        let mut second = tx("2", Some("a"), 1.0);
        second.timestamp = Some(early);
        let agg = aggregate(&registry, &[first, second]);
        assert_eq!(agg.entries[0].last_transaction, Some(late));
    }

    #[test]
    fn test_ranks_are_dense() {
        let registry = TeamRegistry::new(
            (0..6).map(|i| team(&format!("acc{}", i), &format!("T{}", i))).collect(),
        );
        let txs: Vec<_> = (0..6)
            .map(|i| tx(&i.to_string(), Some(&format!("acc{}", i)), (i % 3) as f64 * 100.0))
            .collect();
        let agg = aggregate(&registry, &txs);
        let ranks: Vec<u32> = agg.entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, (1..=6).collect::<Vec<u32>>());
        assert!(agg.entries.windows(2).all(|w| w[0].total_sales >= w[1].total_sales));
    }
}
