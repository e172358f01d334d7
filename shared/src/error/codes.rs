//! Unified error codes for the leaderboard service
//!
//! Error codes are organized by category:
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Data source errors
//! - 4xxx: Leaderboard / analytics errors
//! - 5xxx: Publish errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript dashboards, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 1xxx: Auth ====================
    /// Caller identity missing
    NotAuthenticated = 1001,

    // ==================== 2xxx: Permission ====================
    /// Admin role required
    AdminRequired = 2003,
    /// Email is not present in the access registry
    AccessNotGranted = 2006,

    // ==================== 3xxx: Source ====================
    /// Registry or payment source could not be read
    SourceUnavailable = 3001,
    /// Source returned a payload that could not be decoded
    SourceMalformed = 3002,

    // ==================== 4xxx: Leaderboard ====================
    /// No successful sync cycle has completed yet
    NoSnapshot = 4001,
    /// Time range could not be parsed
    InvalidTimeRange = 4002,

    // ==================== 5xxx: Publish ====================
    /// Sink rejected the snapshot write
    PublishFailed = 5001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Configuration error
    ConfigError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "Authentication required",

            Self::AdminRequired => "Admin role required",
            Self::AccessNotGranted => "Email is not registered for dashboard access",

            Self::SourceUnavailable => "Data source unavailable",
            Self::SourceMalformed => "Data source returned malformed data",

            Self::NoSnapshot => "Leaderboard has not been calculated yet",
            Self::InvalidTimeRange => "Invalid time range",

            Self::PublishFailed => "Snapshot publish failed",

            Self::InternalError => "Internal server error",
            Self::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),

            // Permission
            2003 => Ok(ErrorCode::AdminRequired),
            2006 => Ok(ErrorCode::AccessNotGranted),

            // Source
            3001 => Ok(ErrorCode::SourceUnavailable),
            3002 => Ok(ErrorCode::SourceMalformed),

            // Leaderboard
            4001 => Ok(ErrorCode::NoSnapshot),
            4002 => Ok(ErrorCode::InvalidTimeRange),

            // Publish
            5001 => Ok(ErrorCode::PublishFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}
