//! Snapshot assembly
//!
//! Everything time-dependent comes from the `now` argument so identical
//! inputs at the same instant serialize to identical bytes.

use chrono::{DateTime, Utc};
use serde_json::Value;
use shared::models::{
    CanonicalTransaction, LeaderboardEntry, Snapshot, SnapshotMetadata, TeamRegistry,
};

use super::feed::build_feed;

/// Default size of the recent transactions feed
pub const DEFAULT_FEED_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy)]
pub struct SnapshotBuilder {
    feed_limit: usize,
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_LIMIT)
    }
}

impl SnapshotBuilder {
    pub fn new(feed_limit: usize) -> Self {
        Self { feed_limit }
    }

    pub fn build(
        &self,
        leaderboard: Vec<LeaderboardEntry>,
        feed_records: &[CanonicalTransaction],
        registry: &TeamRegistry,
        now: DateTime<Utc>,
    ) -> Snapshot {
        let metadata = SnapshotMetadata::from_leaderboard(&leaderboard, now);
        Snapshot {
            recent_transactions: build_feed(feed_records, registry, self.feed_limit),
            leaderboard,
            last_sync: now,
            metadata,
        }
    }
}

/// Wire form of a snapshot, written to the sink in one `put`
pub fn to_value(snapshot: &Snapshot) -> Result<Value, serde_json::Error> {
    serde_json::to_value(snapshot)
}
