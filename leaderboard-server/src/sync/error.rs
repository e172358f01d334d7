//! Cycle-fatal errors
//!
//! Per-record problems never surface here; they are counted in
//! [`CycleStats`](super::stats::CycleStats) and logged.

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// A required table could not be read; nothing is published
    #[error("source table '{table}' unavailable: {reason}")]
    SourceUnavailable { table: String, reason: String },

    /// A table was read but its payload could not be decoded
    #[error("source table '{table}' malformed: {reason}")]
    SourceMalformed { table: String, reason: String },

    /// The sink answered with a non-success status
    #[error("publish to '{path}' failed with HTTP {status}: {body}")]
    PublishFailure {
        path: String,
        status: u16,
        body: String,
    },

    /// The sink could not be reached
    #[error("publish to '{path}' failed: {reason}")]
    PublishTransport { path: String, reason: String },

    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl SyncError {
    pub fn source_unavailable(table: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            table: table.into(),
            reason: reason.to_string(),
        }
    }

    pub fn source_malformed(table: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceMalformed {
            table: table.into(),
            reason: reason.to_string(),
        }
    }

    /// Short kind name for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SourceUnavailable { .. } => "SourceUnavailable",
            Self::SourceMalformed { .. } => "SourceMalformed",
            Self::PublishFailure { .. } => "PublishFailure",
            Self::PublishTransport { .. } => "PublishTransport",
            Self::Serialize(_) => "Serialize",
        }
    }
}

impl From<SyncError> for AppError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::SourceUnavailable { table, reason } => {
                AppError::source_unavailable(table, reason)
            }
            SyncError::SourceMalformed { table, reason } => AppError::source_malformed(table, reason),
            SyncError::PublishFailure { path, status, body } => {
                AppError::publish_failed(path, format!("Sink returned HTTP {}: {}", status, body))
                    .with_detail("status", status)
            }
            SyncError::PublishTransport { path, reason } => {
                AppError::publish_failed(path, format!("Sink unreachable: {}", reason))
            }
            SyncError::Serialize(e) => {
                AppError::internal(format!("Serialization failed: {}", e))
            }
        }
    }
}
