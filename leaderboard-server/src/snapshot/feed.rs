//! Recent transactions feed and its filters

use shared::models::{CanonicalTransaction, TeamRegistry, TransactionView, UNKNOWN_TEAM};

/// Build the feed from normalized records
///
/// Records are neither deduplicated nor eligibility filtered; only those
/// with a parsed timestamp appear. Newest first, ties keep input order.
pub fn build_feed(
    records: &[CanonicalTransaction],
    registry: &TeamRegistry,
    limit: usize,
) -> Vec<TransactionView> {
    let mut feed: Vec<TransactionView> = records
        .iter()
        .filter_map(|tx| {
            let timestamp = tx.timestamp?;
            let team = registry.find_for_feed(tx.account_email.as_deref(), tx.account_id.as_deref());
            Some(TransactionView {
                team_name: team.map_or_else(|| UNKNOWN_TEAM.to_string(), |t| t.team_name.clone()),
                group: team.map(|t| t.group_label.clone()).unwrap_or_default(),
                account_id: tx.account_id.clone(),
                amount: tx.amount,
                timestamp,
                payment_id: tx.entity_id.gateway_id().unwrap_or_default().to_string(),
                status: tx.status.clone(),
                event_type: tx.event_type.to_string(),
            })
        })
        .collect();

    feed.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    feed.truncate(limit);
    feed
}

/// Feed filter by event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventFilter {
    All,
    /// `status:<s>`, case-insensitive
    Status(String),
    /// Any event type containing "refund"
    Refunds,
    /// Exact event type, case-insensitive
    EventType(String),
}

impl EventFilter {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim().to_lowercase();
        if raw.is_empty() || raw == "all" {
            Self::All
        } else if let Some(status) = raw.strip_prefix("status:") {
            Self::Status(status.to_string())
        } else if raw.contains("refund") {
            Self::Refunds
        } else {
            Self::EventType(raw)
        }
    }

    pub fn matches(&self, view: &TransactionView) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => view.status.to_lowercase() == *status,
            Self::Refunds => view.event_type.to_lowercase().contains("refund"),
            Self::EventType(kind) => view.event_type.to_lowercase() == *kind,
        }
    }
}

/// Feed filter by team name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamFilter {
    All,
    Named(String),
}

impl TeamFilter {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "all" => Self::All,
            name => Self::Named(name.to_string()),
        }
    }

    pub fn matches(&self, view: &TransactionView) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => view.team_name == *name,
        }
    }
}

/// Apply both filters, keeping feed order
pub fn filter_feed<'a>(
    feed: &'a [TransactionView],
    event: &'a EventFilter,
    team: &'a TeamFilter,
) -> impl Iterator<Item = &'a TransactionView> {
    feed.iter().filter(move |v| event.matches(v) && team.matches(v))
}
