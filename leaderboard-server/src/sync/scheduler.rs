//! 同步调度器
//!
//! 启动后立即同步一次，之后每隔 `SYNC_INTERVAL_SECS` 触发。
//! 由 `ServerState::start_background_tasks()` 启动。

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::engine::SyncEngine;

pub struct SyncScheduler {
    engine: Arc<SyncEngine>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl SyncScheduler {
    pub fn new(engine: Arc<SyncEngine>, interval: Duration, shutdown: CancellationToken) -> Self {
        Self {
            engine,
            interval,
            shutdown,
        }
    }

    /// 主循环：立即同步 → 周期触发，收到 shutdown 退出
    pub async fn run(self) {
        tracing::info!(interval_secs = self.interval.as_secs(), "Sync scheduler started");

        loop {
            if self.shutdown.is_cancelled() {
                break;
            }

            // 定时同步只记录日志，不向外报告
            let report = self.engine.sync().await;
            if !report.success {
                tracing::warn!(message = %report.message, "Scheduled sync failed");
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Sync scheduler received shutdown signal");
                    break;
                }
            }
        }

        tracing::info!("Sync scheduler stopped");
    }
}
