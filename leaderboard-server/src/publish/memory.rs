//! In-memory sink for tests

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

use super::SnapshotSink;
use crate::sync::SyncError;

#[derive(Debug, Default)]
pub struct MemorySink {
    values: Mutex<HashMap<String, Value>>,
    failing: Mutex<HashSet<String>>,
    puts: Mutex<usize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<Value> {
        self.values.lock().get(path).cloned()
    }

    /// Reject every put to `path` until [`Self::recover`]
    pub fn fail_path(&self, path: &str) {
        self.failing.lock().insert(path.to_string());
    }

    pub fn recover(&self, path: &str) {
        self.failing.lock().remove(path);
    }

    /// Successful puts so far
    pub fn put_count(&self) -> usize {
        *self.puts.lock()
    }
}

#[async_trait]
impl SnapshotSink for MemorySink {
    async fn put(&self, path: &str, value: &Value) -> Result<(), SyncError> {
        if self.failing.lock().contains(path) {
            return Err(SyncError::PublishFailure {
                path: path.to_string(),
                status: 503,
                body: "simulated outage".into(),
            });
        }
        self.values.lock().insert(path.to_string(), value.clone());
        *self.puts.lock() += 1;
        Ok(())
    }
}
