//! Ingestion pipeline: rows → normalized → deduplicated → eligible
//!
//! - [`row`] - table parsing
//! - [`normalize`] - field/amount/timestamp normalization
//! - [`dedup`] - one record per entity by event precedence
//! - [`eligibility`] - finalized "paid" filter

pub mod dedup;
pub mod eligibility;
pub mod normalize;
pub mod row;

use chrono_tz::Tz;
use shared::models::{CanonicalTransaction, RawPaymentEvent, TeamRegistry};

pub use normalize::{NormalizeStats, Normalizer, Rejection};

/// Output of [`prepare`]: what aggregation and the feed consume
#[derive(Debug, Clone, Default)]
pub struct Prepared {
    /// Deduplicated, eligible, team-annotated transactions
    pub eligible: Vec<CanonicalTransaction>,
    /// Every normalized record with an event type and a timestamp
    pub feed_records: Vec<CanonicalTransaction>,
    pub normalize: NormalizeStats,
    pub collapsed: usize,
    pub unkeyed: usize,
}

/// Run the full ingestion pipeline over one payments table
pub fn prepare(events: &[RawPaymentEvent], registry: &TeamRegistry, tz: Tz) -> Prepared {
    let normalized = Normalizer::new(tz).normalize(events);
    let deduped = dedup::resolve(normalized.sales_candidates);
    let mut eligible = eligibility::eligible(deduped.transactions);
    attach_teams(&mut eligible, registry);

    Prepared {
        eligible,
        feed_records: normalized.feed_records,
        normalize: normalized.stats,
        collapsed: deduped.collapsed,
        unkeyed: deduped.unkeyed,
    }
}

/// Fill `team_name`/`group_label` from the registry by account id
pub fn attach_teams(transactions: &mut [CanonicalTransaction], registry: &TeamRegistry) {
    for tx in transactions {
        let team = tx
            .account_id
            .as_deref()
            .and_then(|id| registry.find_by_account(id));
        tx.team_name = team.map(|t| t.team_name.clone());
        tx.group_label = team.map(|t| t.group_label.clone());
    }
}
