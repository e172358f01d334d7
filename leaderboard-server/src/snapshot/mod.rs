//! Snapshot assembly, recent transactions feed and role-scoped views

pub mod builder;
pub mod feed;
pub mod view;

pub use builder::{DEFAULT_FEED_LIMIT, SnapshotBuilder, to_value};
pub use feed::{EventFilter, TeamFilter, build_feed, filter_feed};
pub use view::{ScopedView, TEAM_PALETTE_SIZE, scope_feed};
