//! 时间工具函数: 业务时区转换
//!
//! 表格里的时间戳通常不带时区，统一按业务时区解释后转为 UTC。

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::invalid_time_range(format!("Invalid date format: {}", date)))
}

/// 本地时间 → UTC (业务时区)
///
/// DST gap fallback: 如果本地时间不存在 (夏令时跳跃)，按 UTC 解释。
pub fn local_to_utc(naive: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    naive
        .and_local_timezone(tz)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

/// 日期开始 (00:00:00, 业务时区) → UTC
pub fn day_start(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    local_to_utc(date.and_time(chrono::NaiveTime::MIN), tz)
}

/// 日期结束 → 次日 00:00:00 (业务时区)
///
/// 调用方使用 `< end` (不含) 语义。
pub fn next_day_start(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start(next_day, tz)
}

/// 业务时区下的当前日期
pub fn local_date(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}
