//! Format checks shared by the schemas.

use chrono::NaiveDate;
use uuid::Uuid;

/// Hyphenated UUID, e.g. `0b7c4c1e-3f4a-4d5e-9a8b-1c2d3e4f5a6b`.
pub fn is_uuid(value: &str) -> bool {
    value.len() == 36 && Uuid::try_parse(value).is_ok()
}

/// Strict `YYYY-MM-DD` that names a real calendar day.
pub fn is_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    shaped && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// Absolute http(s) URL.
pub fn is_url(value: &str) -> bool {
    reqwest::Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}
