//! In-memory source for tests and local experiments

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::models::Row;
use std::collections::{HashMap, HashSet};

use super::{RowSource, SourceTable, missing_table};
use crate::sync::SyncError;

/// Tables held in memory; a table never set behaves as missing upstream
#[derive(Debug, Default)]
pub struct MemorySource {
    tables: RwLock<HashMap<SourceTable, Vec<Row>>>,
    failing: RwLock<HashSet<SourceTable>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rows(&self, table: SourceTable, rows: Vec<Row>) {
        self.tables.write().insert(table, rows);
    }

    /// Make every fetch of `table` fail until [`Self::recover`]
    pub fn fail(&self, table: SourceTable) {
        self.failing.write().insert(table);
    }

    pub fn recover(&self, table: SourceTable) {
        self.failing.write().remove(&table);
    }
}

#[async_trait]
impl RowSource for MemorySource {
    async fn fetch(&self, table: SourceTable) -> Result<Vec<Row>, SyncError> {
        if self.failing.read().contains(&table) {
            return Err(SyncError::source_unavailable(table.name(), "simulated outage"));
        }
        let rows = self.tables.read().get(&table).cloned();
        match rows {
            Some(rows) => Ok(rows),
            None => missing_table(table, "not set"),
        }
    }
}
