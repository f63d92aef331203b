//! Display formatting for closure fields.
//!
//! Every function here is total: input it cannot interpret comes back
//! unchanged, and empty input renders as [`PLACEHOLDER`].

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Shown in place of an empty field.
pub const PLACEHOLDER: &str = "-";

static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]").expect("valid regex"));

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// `2024-01-05` → `2024.01.05`; unparseable dates are echoed.
pub fn format_date(value: &str) -> String {
    if value.is_empty() {
        return PLACEHOLDER.to_string();
    }
    match parse_date(value) {
        Some(d) => d.format("%Y.%m.%d").to_string(),
        None => value.to_string(),
    }
}

/// Hyphenate 11-digit numbers as 3-4-4 and 10-digit numbers as 3-3-4.
///
/// Any other digit count returns the input as given.
pub fn format_phone(value: &str) -> String {
    if value.is_empty() {
        return PLACEHOLDER.to_string();
    }
    let digits = NON_DIGIT.replace_all(value, "");
    match digits.len() {
        11 => format!("{}-{}-{}", &digits[..3], &digits[3..7], &digits[7..]),
        10 => format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..]),
        _ => value.to_string(),
    }
}

/// Join a JSON string array with `, `; anything else is returned as is.
pub fn format_chadan(value: &str) -> String {
    if value.is_empty() {
        return PLACEHOLDER.to_string();
    }
    let trimmed = value.trim();
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        if let Ok(parts) = serde_json::from_str::<Vec<String>>(trimmed) {
            return parts.join(", ");
        }
    }
    value.to_string()
}

/// Escape free text for embedding in HTML.
pub fn escape_text(value: &str) -> String {
    if value.is_empty() {
        return PLACEHOLDER.to_string();
    }
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-01-05"), "2024.01.05");
        assert_eq!(format_date("2024/01/05"), "2024.01.05");
        assert_eq!(format_date("2024.01.05"), "2024.01.05");
        assert_eq!(format_date("2024-01-05T09:30:00"), "2024.01.05");
        assert_eq!(format_date("2024-01-05T23:30:00+09:00"), "2024.01.05");
        assert_eq!(format_date(""), "-");
        assert_eq!(format_date("내일"), "내일");
        assert_eq!(format_date("2024-02-30"), "2024-02-30");
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("01012345678"), "010-1234-5678");
        assert_eq!(format_phone("010-1234-5678"), "010-1234-5678");
        assert_eq!(format_phone("0212345678"), "021-234-5678");
        assert_eq!(format_phone("(031) 123 4567"), "031-123-4567");
        assert_eq!(format_phone("1588-2504"), "1588-2504");
        assert_eq!(format_phone("없음"), "없음");
        assert_eq!(format_phone(""), "-");
    }

    #[test]
    fn test_format_chadan() {
        assert_eq!(format_chadan(r#"["A","B"]"#), "A, B");
        assert_eq!(format_chadan(r#" ["1차로"] "#), "1차로");
        assert_eq!(format_chadan("[]"), "");
        assert_eq!(format_chadan("동측 1차로"), "동측 1차로");
        assert_eq!(format_chadan("[1차로,2차로]"), "[1차로,2차로]");
        assert_eq!(format_chadan("[1, 2]"), "[1, 2]");
        assert_eq!(format_chadan(""), "-");
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(
            escape_text(r#"<b onclick="x">A&B's</b>"#),
            "&lt;b onclick=&quot;x&quot;&gt;A&amp;B&#39;s&lt;/b&gt;"
        );
        assert_eq!(escape_text("포장보수"), "포장보수");
        assert_eq!(escape_text(""), "-");
    }
}
