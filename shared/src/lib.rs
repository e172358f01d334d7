//! Shared types for the sales leaderboard
//!
//! Domain models (payment events, teams, leaderboard, snapshot, access),
//! the unified error system and small pure helpers.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
