//! 时间类型模块
//!
//! `Timestamp` 是可序列化的毫秒时间戳。后端对不同实体使用不同的时间表示：
//! `java.sql.Timestamp` 序列化为毫秒数字，`LocalDateTime` 序列化为不带时区的
//! ISO 字符串。两种形式都在反序列化时被接受。

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::time::Duration;

/// 缺失日期时的显示文本
pub const MISSING_DATE: &str = "N/A";

// =========================================================
// Timestamp - 可传输的时间戳类型
// =========================================================

/// 毫秒时间戳，内部存储为自 Unix 纪元以来的毫秒数
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Default)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    #[inline]
    pub const fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// 解析 RFC 3339 / 不带时区的 ISO 8601 / 纯日期字符串
    ///
    /// 不带时区的时间按 UTC 处理，显示时同样按 UTC 格式化，墙上时间保持不变。
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.timestamp_millis()));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(Self(naive.and_utc().timestamp_millis()));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
            return Some(Self(naive.and_utc().timestamp_millis()));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| Self(naive.and_utc().timestamp_millis()))
    }

    /// 格式化为 `1 May 2024` 形式
    pub fn format_date(&self) -> String {
        match DateTime::from_timestamp_millis(self.0) {
            Some(dt) => dt.format("%-d %b %Y").to_string(),
            None => MISSING_DATE.to_string(),
        }
    }

    /// 格式化为 `1 May 2024, 14:05` 形式（账单历史使用）
    pub fn format_date_time(&self) -> String {
        match DateTime::from_timestamp_millis(self.0) {
            Some(dt) => dt.format("%-d %b %Y, %H:%M").to_string(),
            None => MISSING_DATE.to_string(),
        }
    }
}

/// 可选日期的显示文本，缺失时返回 `N/A`
pub fn format_optional_date(ts: Option<Timestamp>) -> String {
    ts.map(|t| t.format_date())
        .unwrap_or_else(|| MISSING_DATE.to_string())
}

impl From<i64> for Timestamp {
    fn from(ms: i64) -> Self {
        Self(ms)
    }
}

impl Add<Duration> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs.as_millis() as i64)
    }
}

impl Sub<Timestamp> for Timestamp {
    type Output = Duration;

    /// 计算两个时间戳之间的差值，负值截断为 0
    fn sub(self, rhs: Timestamp) -> Self::Output {
        let diff_ms = (self.0 - rhs.0).max(0);
        Duration::from_millis(diff_ms as u64)
    }
}

// =========================================================
// 宽松反序列化：数字毫秒或字符串
// =========================================================

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("epoch milliseconds or an ISO-8601 date string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Timestamp(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(Timestamp)
            .map_err(|_| E::custom("timestamp out of range"))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Timestamp(v as i64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Timestamp::parse(v).ok_or_else(|| E::custom(format!("unrecognised date: {}", v)))
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_epoch_millis() {
        let ts: Timestamp = serde_json::from_str("1714558800000").unwrap();
        assert_eq!(ts.as_millis(), 1_714_558_800_000);
        assert_eq!(ts.format_date(), "1 May 2024");
    }

    #[test]
    fn accepts_local_date_time_without_offset() {
        let ts: Timestamp = serde_json::from_str("\"2024-05-01T10:20:30.123456\"").unwrap();
        assert_eq!(ts.format_date(), "1 May 2024");
        assert_eq!(ts.format_date_time(), "1 May 2024, 10:20");
    }

    #[test]
    fn accepts_rfc3339() {
        let ts = Timestamp::parse("2024-12-31T23:00:00Z").unwrap();
        assert_eq!(ts.format_date(), "31 Dec 2024");
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_str::<Timestamp>("\"yesterday\"").is_err());
    }

    #[test]
    fn missing_date_renders_placeholder() {
        assert_eq!(format_optional_date(None), "N/A");
    }

    #[test]
    fn difference_saturates_at_zero() {
        let a = Timestamp::from_millis(1_000);
        let b = Timestamp::from_millis(5_000);
        assert_eq!(a - b, Duration::ZERO);
        assert_eq!(b - a, Duration::from_secs(4));
    }
}
