//! Per-cycle counters

use crate::ingest::NormalizeStats;

/// What one cycle read, dropped and produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    pub teams: usize,
    pub access_entries: usize,
    pub payment_rows: usize,
    pub normalize: NormalizeStats,
    /// Deliveries folded into an earlier record for the same entity
    pub collapsed: usize,
    pub unkeyed: usize,
    pub eligible: usize,
    pub unknown_accounts: usize,
    pub missing_account_refs: usize,
    pub feed_len: usize,
}

impl CycleStats {
    pub fn log(&self) {
        tracing::info!(
            teams = self.teams,
            payment_rows = self.payment_rows,
            sales_candidates = self.normalize.sales_candidates,
            feed_records = self.normalize.feed_records,
            rejected = self.normalize.rejected,
            malformed_amounts = self.normalize.malformed_amounts,
            unparsed_timestamps = self.normalize.unparsed_timestamps,
            missing_ids = self.normalize.missing_ids,
            collapsed = self.collapsed,
            unkeyed = self.unkeyed,
            eligible = self.eligible,
            unknown_accounts = self.unknown_accounts,
            missing_account_refs = self.missing_account_refs,
            feed_len = self.feed_len,
            "Cycle stats"
        );
    }
}
