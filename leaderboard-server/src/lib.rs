//! Leaderboard Server - 销售竞赛排行榜同步服务
//!
//! # 架构概述
//!
//! 周期性读取团队登记表、支付事件表和权限表，计算排行榜快照并整体发布到
//! 实时数据库；同时提供按角色裁剪的看板和时间段分析 HTTP 接口。
//!
//! # 模块结构
//!
//! ```text
//! leaderboard-server/src/
//! ├── core/          # 配置、状态、后台任务、HTTP 服务器
//! ├── sources/       # 数据源 (Sheets / JSON 文件 / 内存)
//! ├── ingest/        # 行解析、归一化、去重、资格过滤
//! ├── aggregation/   # 团队汇总、排名、趋势、时间段分析
//! ├── snapshot/      # 快照组装、交易流、角色视图
//! ├── publish/       # 发布目标 (Firebase / 内存)
//! ├── sync/          # 同步周期编排与调度
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、时间工具
//! ```

pub mod aggregation;
pub mod api;
pub mod core;
pub mod ingest;
pub mod publish;
pub mod snapshot;
pub mod sources;
pub mod sync;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use sync::{SyncEngine, SyncError};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    __                   __          __                         __
   / /   ___  ____ _____/ /__  _____/ /_  ____  ____ __________/ /
  / /   / _ \/ __ `/ __  / _ \/ ___/ __ \/ __ \/ __ `/ ___/ __  /
 / /___/  __/ /_/ / /_/ /  __/ /  / /_/ / /_/ / /_/ / /  / /_/ /
/_____/\___/\__,_/\__,_/\___/_/  /_.___/\____/\__,_/_/   \__,_/
    "#
    );
}
