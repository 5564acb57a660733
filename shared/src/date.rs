//! 时间格式化
//!
//! 服务端时间戳通常是不带时区的 ISO 8601（可能含微秒），
//! 也可能是 RFC 3339。这里只负责把它们渲染成日期。

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// 解析服务端时间字符串，返回日期部分
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// 以 `M/D/YYYY` 形式展示日期；无法解析时原样返回
pub fn format_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%-m/%-d/%Y").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_iso_with_microseconds() {
        assert_eq!(format_date("2024-03-05T14:22:10.123456"), "3/5/2024");
        assert_eq!(format_date("2024-11-25T08:00:00"), "11/25/2024");
    }

    #[test]
    fn rfc3339_and_plain_date() {
        assert_eq!(format_date("2023-12-31T23:00:00+00:00"), "12/31/2023");
        assert_eq!(format_date("2022-01-09"), "1/9/2022");
    }

    #[test]
    fn unparseable_is_passed_through() {
        assert_eq!(format_date("yesterday"), "yesterday");
        assert_eq!(format_date(""), "");
    }
}
