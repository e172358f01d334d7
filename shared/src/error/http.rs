//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::NoSnapshot => StatusCode::NOT_FOUND,

            // 401 Unauthorized
            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::AdminRequired | Self::AccessNotGranted => StatusCode::FORBIDDEN,

            // 502 Bad Gateway (upstream collaborator failed)
            Self::SourceUnavailable | Self::SourceMalformed | Self::PublishFailed => {
                StatusCode::BAD_GATEWAY
            }

            // 500 Internal Server Error
            Self::InternalError | Self::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request
            Self::InvalidTimeRange => StatusCode::BAD_REQUEST,
        }
    }
}
