//! Data models
//!
//! Shared between the leaderboard server and the dashboards (via the
//! published snapshot and the HTTP API). Wire format is camelCase JSON.

pub mod access;
pub mod leaderboard;
pub mod payment;
pub mod row;
pub mod snapshot;
pub mod sync;
pub mod team;

// Re-exports
pub use access::*;
pub use leaderboard::*;
pub use payment::*;
pub use row::*;
pub use snapshot::*;
pub use sync::*;
pub use team::*;
