//! Manual sync result

use serde::{Deserialize, Serialize};

/// Outcome of one sync cycle as returned by `POST /api/sync`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub success: bool,
    pub message: String,
    /// Cycle duration in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams_count: Option<usize>,
    /// Rows in the published recent transactions feed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactions_count: Option<usize>,
    /// Whether the access list reached the sink this cycle
    pub access_synced: bool,
}

impl SyncReport {
    pub fn completed(
        duration: f64,
        teams_count: usize,
        transactions_count: usize,
        access_synced: bool,
    ) -> Self {
        Self {
            success: true,
            message: "Sync completed successfully".to_string(),
            duration: Some(duration),
            teams_count: Some(teams_count),
            transactions_count: Some(transactions_count),
            access_synced,
        }
    }

    pub fn failed(reason: impl std::fmt::Display, access_synced: bool) -> Self {
        Self {
            success: false,
            message: format!("Sync failed: {}", reason),
            duration: None,
            teams_count: None,
            transactions_count: None,
            access_synced,
        }
    }
}
