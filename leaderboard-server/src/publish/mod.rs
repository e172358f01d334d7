//! Snapshot sinks
//!
//! A `put` replaces the value at `path` wholesale; readers of the sink
//! never see a partially written snapshot.

mod firebase;
mod memory;

pub use firebase::FirebaseSink;
pub use memory::MemorySink;

use async_trait::async_trait;
use serde_json::Value;

use crate::sync::SyncError;

#[async_trait]
pub trait SnapshotSink: Send + Sync {
    async fn put(&self, path: &str, value: &Value) -> Result<(), SyncError>;
}
