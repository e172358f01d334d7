//! Google Sheets values API source

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use shared::models::Row;
use std::time::Duration;

use super::{RowSource, SourceTable, missing_table};
use crate::ingest::row::rows_from_matrix;
use crate::sync::SyncError;

/// Sheet (tab) name per table
#[derive(Debug, Clone)]
pub struct SheetNames {
    pub teams: String,
    pub payments: String,
    pub access: String,
}

impl SheetNames {
    fn get(&self, table: SourceTable) -> &str {
        match table {
            SourceTable::Teams => &self.teams,
            SourceTable::Payments => &self.payments,
            SourceTable::Access => &self.access,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// `GET {base}/{sheet_id}/values/{sheet}?key=...`
pub struct SheetsSource {
    client: reqwest::Client,
    base_url: String,
    sheet_id: String,
    api_key: String,
    sheets: SheetNames,
}

impl SheetsSource {
    pub fn new(
        base_url: impl Into<String>,
        sheet_id: impl Into<String>,
        api_key: impl Into<String>,
        sheets: SheetNames,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            sheet_id: sheet_id.into(),
            api_key: api_key.into(),
            sheets,
        })
    }

    /// Values URL for one sheet, path segments percent-encoded
    fn values_url(&self, sheet: &str) -> Result<Url, String> {
        let mut url = Url::parse(self.base_url.trim_end_matches('/'))
            .map_err(|e| format!("invalid SHEETS_BASE_URL: {}", e))?;
        url.path_segments_mut()
            .map_err(|_| "SHEETS_BASE_URL cannot be a base".to_string())?
            .pop_if_empty()
            .extend([self.sheet_id.as_str(), "values", sheet]);
        Ok(url)
    }
}

#[async_trait]
impl RowSource for SheetsSource {
    async fn fetch(&self, table: SourceTable) -> Result<Vec<Row>, SyncError> {
        let sheet = self.sheets.get(table);
        let url = self
            .values_url(sheet)
            .map_err(|e| SyncError::source_unavailable(table.name(), e))?;

        let resp = self
            .client
            .get(url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| SyncError::source_unavailable(table.name(), e))?;

        let status = resp.status();
        // The API answers 400 for an unknown sheet name
        if status == StatusCode::BAD_REQUEST || status == StatusCode::NOT_FOUND {
            return missing_table(table, format!("sheet '{}' returned HTTP {}", sheet, status.as_u16()));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SyncError::source_unavailable(
                table.name(),
                format!("HTTP {}: {}", status.as_u16(), body),
            ));
        }

        let range: ValueRange = resp
            .json()
            .await
            .map_err(|e| SyncError::source_malformed(table.name(), format!("invalid body: {}", e)))?;

        let rows = rows_from_matrix(&range.values);
        tracing::debug!(table = %table, sheet, rows = rows.len(), "Fetched sheet");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base: &str) -> SheetsSource {
        SheetsSource::new(
            base,
            "sheet123",
            "k",
            SheetNames {
                teams: "MasterData".into(),
                payments: "Razorpay_Payments".into(),
                access: "Access".into(),
            },
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_values_url() {
        let src = source("https://sheets.googleapis.com/v4/spreadsheets/");
        let url = src.values_url("Razorpay Payments").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet123/values/Razorpay%20Payments"
        );
    }

    #[test]
    fn test_sheet_names() {
        let src = source("http://localhost");
        assert_eq!(src.sheets.get(SourceTable::Teams), "MasterData");
        assert_eq!(src.sheets.get(SourceTable::Access), "Access");
    }

    #[test]
    fn test_value_range_without_values() {
        let range: ValueRange = serde_json::from_str(r#"{"range":"Access!A1:Z1000"}"#).unwrap();
        assert!(range.values.is_empty());
    }
}
