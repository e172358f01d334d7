//! Row sources: where the registry, payment and access tables come from
//!
//! - [`SheetsSource`] - Google Sheets values API
//! - [`JsonFileSource`] - `{dir}/{table}.json` on disk
//! - [`MemorySource`] - in-memory tables for tests

mod file;
mod memory;
mod sheets;

pub use file::JsonFileSource;
pub use memory::MemorySource;
pub use sheets::{SheetNames, SheetsSource};

use async_trait::async_trait;
use shared::models::Row;
use std::fmt;

use crate::sync::SyncError;

/// The three tables a cycle reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceTable {
    Teams,
    Payments,
    Access,
}

impl SourceTable {
    pub const ALL: [SourceTable; 3] = [Self::Teams, Self::Payments, Self::Access];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Teams => "teams",
            Self::Payments => "payments",
            Self::Access => "access",
        }
    }

    /// Only the team registry must exist; the others may be absent
    pub fn is_required(&self) -> bool {
        matches!(self, Self::Teams)
    }
}

impl fmt::Display for SourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[async_trait]
pub trait RowSource: Send + Sync {
    /// Read the whole table, header resolved, blank rows dropped
    async fn fetch(&self, table: SourceTable) -> Result<Vec<Row>, SyncError>;
}

/// Result for a table that does not exist upstream
pub(crate) fn missing_table(table: SourceTable, reason: impl fmt::Display) -> Result<Vec<Row>, SyncError> {
    if table.is_required() {
        return Err(SyncError::source_unavailable(table.name(), reason));
    }
    tracing::warn!(table = %table, reason = %reason, "Source table missing, treating as empty");
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names() {
        let names: Vec<&str> = SourceTable::ALL.iter().map(SourceTable::name).collect();
        assert_eq!(names, vec!["teams", "payments", "access"]);
        assert_eq!(SourceTable::Payments.to_string(), "payments");
    }

    #[test]
    fn test_missing_table() {
        assert!(matches!(
            missing_table(SourceTable::Teams, "gone"),
            Err(SyncError::SourceUnavailable { .. })
        ));
        assert!(missing_table(SourceTable::Access, "gone").unwrap().is_empty());
    }
}
