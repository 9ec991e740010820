//! 时间处理模块
//!
//! 服务端返回的 `createdAt` 格式并不统一（RFC 3339 字符串、无时区字符串或毫秒时间戳）。
//! 这里统一解析为 `DateTime<Utc>`，无法识别的值视为缺失，而不是让整个响应解析失败。

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// 宽松解析单个 JSON 值
pub fn parse_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_str(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

/// 解析 RFC 3339 或无时区的 ISO 8601 字符串
pub fn parse_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// 短日期格式，如 `3/14/2024`
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%-m/%-d/%Y").to_string()
}

/// `Option` 版本，缺失时返回占位符
pub fn format_optional(dt: Option<&DateTime<Utc>>, placeholder: &str) -> String {
    dt.map(format_date)
        .unwrap_or_else(|| placeholder.to_string())
}

/// serde `with` 模块：宽松的可选时间字段
pub mod lenient {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw.as_ref().and_then(parse_value))
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }
}
