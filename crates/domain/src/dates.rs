//! 日期字段的反序列化
//!
//! 生产者既会发送 `2024-07-20`，也会发送 `2024-07-20T00:00:00.000Z`。
//! 两者都落到 `date` 列，时间部分丢弃。

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, de::Error};

/// 解析 `YYYY-MM-DD` 或 RFC 3339 时间戳
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| format!("invalid date `{}`, expected YYYY-MM-DD or RFC 3339", value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(D::Error::custom)
}

/// 可选日期，配合 `#[serde(default)]` 使用
pub mod option {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse_date(&raw).map_err(D::Error::custom))
            .transpose()
    }
}
