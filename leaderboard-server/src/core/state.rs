//! 服务器状态
//!
//! 持有配置和同步引擎，通过 `Clone` 在 axum handler 之间共享。

use std::sync::Arc;
use std::time::Duration;

use super::{BackgroundTasks, Config, SourceMode};
use crate::publish::{FirebaseSink, SnapshotSink};
use crate::sources::{JsonFileSource, RowSource, SheetNames, SheetsSource};
use crate::sync::{EngineSettings, SyncEngine, SyncScheduler};
use crate::utils::{AppError, AppResult};

/// 服务器状态
///
/// ```ignore
/// let state = ServerState::initialize(&config)?;
/// let tasks = state.start_background_tasks();
/// let app = api::build_app(state.clone());
/// ```
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 同步引擎 (周期调度与手动同步共用)
    pub engine: Arc<SyncEngine>,
}

impl ServerState {
    /// 手动构造 (测试中注入内存数据源)
    pub fn new(config: Config, engine: Arc<SyncEngine>) -> Self {
        Self { config, engine }
    }

    /// 按配置初始化数据源、发布目标和同步引擎
    pub fn initialize(config: &Config) -> AppResult<Self> {
        let timeout = Duration::from_millis(config.request_timeout_ms);

        let source: Arc<dyn RowSource> = match config.source_mode {
            SourceMode::Sheets => Arc::new(
                SheetsSource::new(
                    config.sheets_base_url.clone(),
                    config.sheet_id.clone(),
                    config.sheets_api_key.clone(),
                    SheetNames {
                        teams: config.teams_sheet.clone(),
                        payments: config.payments_sheet.clone(),
                        access: config.access_sheet.clone(),
                    },
                    timeout,
                )
                .map_err(|e| AppError::config(format!("Failed to build Sheets client: {}", e)))?,
            ),
            SourceMode::File => Arc::new(JsonFileSource::new(config.data_dir.clone())),
        };

        let sink: Arc<dyn SnapshotSink> = Arc::new(
            FirebaseSink::new(
                config.firebase_db_url.clone(),
                config.firebase_secret.clone(),
                timeout,
            )
            .map_err(|e| AppError::config(format!("Failed to build sink client: {}", e)))?,
        );

        tracing::info!(
            source = ?config.source_mode,
            snapshot_path = %config.snapshot_path,
            access_path = %config.access_path,
            "Sync engine configured"
        );

        let engine = SyncEngine::new(source, sink, EngineSettings::from_config(config));
        Ok(Self::new(config.clone(), Arc::new(engine)))
    }

    /// 启动后台任务 (同步调度器)
    ///
    /// 返回的 [`BackgroundTasks`] 由调用方在退出时 `shutdown()`
    pub fn start_background_tasks(&self) -> BackgroundTasks {
        let mut tasks = BackgroundTasks::new();
        let scheduler = SyncScheduler::new(
            self.engine.clone(),
            Duration::from_secs(self.config.sync_interval_secs),
            tasks.shutdown_token(),
        );
        tasks.spawn("sync_scheduler", scheduler.run());
        tasks
    }
}
