//! Error types and API response structures

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// Carried across the HTTP boundary of the leaderboard service:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (source table, sink path, upstream status)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn admin_required() -> Self {
        Self::new(ErrorCode::AdminRequired)
    }

    pub fn access_not_granted(email: impl Into<String>) -> Self {
        Self::new(ErrorCode::AccessNotGranted).with_detail("email", email.into())
    }

    pub fn invalid_time_range(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidTimeRange, msg)
    }

    /// Snapshot not yet available (no successful cycle since startup)
    pub fn no_snapshot() -> Self {
        Self::new(ErrorCode::NoSnapshot)
    }

    /// Registry or payments table could not be read
    pub fn source_unavailable(table: impl Into<String>, reason: impl Into<String>) -> Self {
        let table = table.into();
        Self::with_message(
            ErrorCode::SourceUnavailable,
            format!("Source table '{}' unavailable: {}", table, reason.into()),
        )
        .with_detail("table", table)
    }

    /// Table was read but its payload could not be decoded
    pub fn source_malformed(table: impl Into<String>, reason: impl Into<String>) -> Self {
        let table = table.into();
        Self::with_message(
            ErrorCode::SourceMalformed,
            format!("Source table '{}' malformed: {}", table, reason.into()),
        )
        .with_detail("table", table)
    }

    /// Sink rejected or failed to receive a write
    pub fn publish_failed(path: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PublishFailed, msg).with_detail("path", path.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ConfigError, msg)
    }
}

/// Unified API response structure
///
/// Every failed request is answered with this body:
/// - `code`: Error code
/// - `message`: Human-readable message
/// - `data`: Response payload, absent on errors
/// - `details`: Additional error details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code (0 for success, non-zero for errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Human-readable message
    pub message: String,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiResponse<()> {
    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::<()>::error(&self);

        match self.code.category() {
            super::category::ErrorCategory::System => {
                tracing::error!(code = %self.code, message = %self.message, "System error occurred");
            }
            super::category::ErrorCategory::Source | super::category::ErrorCategory::Publish => {
                tracing::warn!(code = %self.code, message = %self.message, "Upstream error");
            }
            _ => {}
        }

        (status, Json(body)).into_response()
    }
}
