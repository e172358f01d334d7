//! Firebase Realtime Database REST sink

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use super::SnapshotSink;
use crate::sync::SyncError;

/// `PUT {db_url}/{path}.json[?auth=secret]`
pub struct FirebaseSink {
    client: reqwest::Client,
    db_url: String,
    secret: Option<String>,
}

impl FirebaseSink {
    pub fn new(
        db_url: impl Into<String>,
        secret: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            db_url: db_url.into(),
            secret,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}.json",
            self.db_url.trim_end_matches('/'),
            path.trim_matches('/')
        )
    }
}

#[async_trait]
impl SnapshotSink for FirebaseSink {
    async fn put(&self, path: &str, value: &Value) -> Result<(), SyncError> {
        let mut request = self.client.put(self.endpoint(path)).json(value);
        if let Some(secret) = &self.secret {
            request = request.query(&[("auth", secret.as_str())]);
        }

        let resp = request.send().await.map_err(|e| SyncError::PublishTransport {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SyncError::PublishFailure {
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(path, status = status.as_u16(), "Published");
        Ok(())
    }
}
