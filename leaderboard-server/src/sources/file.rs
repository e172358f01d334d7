//! JSON file source for local runs

use async_trait::async_trait;
use serde_json::Value;
use shared::models::Row;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{RowSource, SourceTable, missing_table};
use crate::ingest::row::rows_from_matrix;
use crate::sync::SyncError;

/// Reads `{dir}/{table}.json`
///
/// The file holds either an array of objects or a header row followed by
/// data rows.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    dir: PathBuf,
}

impl JsonFileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, table: SourceTable) -> PathBuf {
        self.dir.join(format!("{}.json", table.name()))
    }
}

#[async_trait]
impl RowSource for JsonFileSource {
    async fn fetch(&self, table: SourceTable) -> Result<Vec<Row>, SyncError> {
        let path = self.path(table);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return missing_table(table, format!("{} not found", path.display()));
            }
            Err(e) => return Err(SyncError::source_unavailable(table.name(), e)),
        };

        let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
            SyncError::source_malformed(table.name(), format!("{}: {}", path.display(), e))
        })?;
        decode_table(value).map_err(|reason| SyncError::source_malformed(table.name(), reason))
    }
}

fn decode_table(value: Value) -> Result<Vec<Row>, String> {
    let Value::Array(items) = value else {
        return Err("expected a JSON array".into());
    };

    if items.iter().all(Value::is_object) {
        return Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(row) => Some(row),
                _ => None,
            })
            .collect());
    }

    let matrix: Option<Vec<Vec<Value>>> = items
        .into_iter()
        .map(|item| match item {
            Value::Array(cells) => Some(cells),
            _ => None,
        })
        .collect();
    matrix
        .map(|m| rows_from_matrix(&m))
        .ok_or_else(|| "expected an array of objects or of rows".to_string())
}
