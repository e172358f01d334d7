//! Sync cycle orchestration
//!
//! - [`engine`] - one read → aggregate → publish batch
//! - [`scheduler`] - periodic trigger
//! - [`error`] - cycle-fatal errors
//! - [`stats`] - per-cycle counters

pub mod engine;
pub mod error;
pub mod scheduler;
pub mod stats;

pub use engine::{Clock, CycleArtifacts, CycleResult, EngineSettings, SyncEngine, system_clock};
pub use error::SyncError;
pub use scheduler::SyncScheduler;
pub use stats::CycleStats;
