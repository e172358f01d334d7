use chrono_tz::Tz;
use std::path::PathBuf;

/// 数据源模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    /// Google Sheets values API
    Sheets,
    /// `{DATA_DIR}/{table}.json` 本地文件
    File,
}

impl SourceMode {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" | "json" => Self::File,
            _ => Self::Sheets,
        }
    }
}

/// 服务器配置 - 排行榜同步服务的所有配置项
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | SYNC_INTERVAL_SECS | 300 | 同步周期(秒) |
/// | RECENT_TRANSACTIONS_LIMIT | 20 | 快照中最近交易条数 |
/// | TIMEZONE | Asia/Kolkata | 业务时区 |
/// | SOURCE_MODE | sheets | 数据源: sheets / file |
/// | DATA_DIR | ./data | file 模式的数据目录 |
/// | SHEET_ID | - | 表格 ID |
/// | SHEETS_API_KEY | - | Sheets API key |
/// | SHEETS_BASE_URL | https://sheets.googleapis.com/v4/spreadsheets | Sheets API 地址 |
/// | TEAMS_SHEET | MasterData | 团队表 |
/// | PAYMENTS_SHEET | Razorpay_Payments | 支付事件表 |
/// | ACCESS_SHEET | Access | 权限表 |
/// | FIREBASE_DB_URL | - | 实时数据库地址 |
/// | FIREBASE_SECRET | - | 数据库密钥 (可选) |
/// | SNAPSHOT_PATH | sparkTank | 快照写入路径 |
/// | ACCESS_PATH | access | 权限列表写入路径 |
/// | REQUEST_TIMEOUT_MS | 30000 | 外部请求超时(毫秒) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | - | 日志目录 (存在时写文件) |
///
/// # 示例
///
/// ```ignore
/// SOURCE_MODE=file DATA_DIR=./fixtures HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub sync_interval_secs: u64,
    pub recent_transactions_limit: usize,
    /// 业务时区 (无时区的时间戳按此解释)
    pub timezone: Tz,

    // === 数据源 ===
    pub source_mode: SourceMode,
    pub data_dir: PathBuf,
    pub sheet_id: String,
    pub sheets_api_key: String,
    pub sheets_base_url: String,
    pub teams_sheet: String,
    pub payments_sheet: String,
    pub access_sheet: String,

    // === 发布目标 ===
    pub firebase_db_url: String,
    pub firebase_secret: Option<String>,
    pub snapshot_path: String,
    pub access_path: String,

    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let timezone = std::env::var("TIMEZONE")
            .ok()
            .and_then(|tz| match tz.parse::<Tz>() {
                Ok(tz) => Some(tz),
                Err(e) => {
                    tracing::warn!("Invalid TIMEZONE '{}': {}, falling back to Asia/Kolkata", tz, e);
                    None
                }
            })
            .unwrap_or(chrono_tz::Asia::Kolkata);

        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            sync_interval_secs: std::env::var("SYNC_INTERVAL_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(300),
            recent_transactions_limit: std::env::var("RECENT_TRANSACTIONS_LIMIT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(20),
            timezone,

            source_mode: std::env::var("SOURCE_MODE")
                .map(|m| SourceMode::parse(&m))
                .unwrap_or(SourceMode::Sheets),
            data_dir: std::env::var("DATA_DIR")
                .unwrap_or_else(|_| "./data".into())
                .into(),
            sheet_id: std::env::var("SHEET_ID").unwrap_or_default(),
            sheets_api_key: std::env::var("SHEETS_API_KEY").unwrap_or_default(),
            sheets_base_url: std::env::var("SHEETS_BASE_URL")
                .unwrap_or_else(|_| "https://sheets.googleapis.com/v4/spreadsheets".into()),
            teams_sheet: std::env::var("TEAMS_SHEET").unwrap_or_else(|_| "MasterData".into()),
            payments_sheet: std::env::var("PAYMENTS_SHEET")
                .unwrap_or_else(|_| "Razorpay_Payments".into()),
            access_sheet: std::env::var("ACCESS_SHEET").unwrap_or_else(|_| "Access".into()),

            firebase_db_url: std::env::var("FIREBASE_DB_URL").unwrap_or_default(),
            firebase_secret: std::env::var("FIREBASE_SECRET")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            snapshot_path: std::env::var("SNAPSHOT_PATH").unwrap_or_else(|_| "sparkTank".into()),
            access_path: std::env::var("ACCESS_PATH").unwrap_or_else(|_| "access".into()),

            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        }
    }

    /// 启动前检查必填项
    pub fn validate(&self) -> Result<(), String> {
        if self.source_mode == SourceMode::Sheets {
            if self.sheet_id.is_empty() {
                return Err("SHEET_ID is required when SOURCE_MODE=sheets".into());
            }
            if self.sheets_api_key.is_empty() {
                return Err("SHEETS_API_KEY is required when SOURCE_MODE=sheets".into());
            }
        }
        if self.firebase_db_url.is_empty() {
            return Err("FIREBASE_DB_URL is required".into());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
