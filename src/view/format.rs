//! Display formatting
//!
//! Numbers are grouped in thousands with commas (`1,234,567`); timestamps
//! render as `DD MMM YYYY HH:mm:ss` in the caller's time zone.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Format pattern for the "Updated At" timestamp
pub const TIMESTAMP_FORMAT: &str = "%d %b %Y %H:%M:%S";

/// Group an unsigned count in thousands
pub fn count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Group a signed count in thousands
pub fn signed(n: i64) -> String {
    if n < 0 {
        format!("-{}", count(n.unsigned_abs()))
    } else {
        count(n as u64)
    }
}

/// Short form for map labels: `950`, `1.2k`, `34k`, `1.5M`
pub fn compact(n: i64) -> String {
    if n < 0 {
        return format!("-{}", compact_unsigned(n.unsigned_abs()));
    }
    compact_unsigned(n as u64)
}

fn compact_unsigned(n: u64) -> String {
    fn scaled(n: u64, unit: u64, suffix: &str) -> String {
        let value = n as f64 / unit as f64;
        if value < 10.0 {
            format!("{:.1}{}", (value * 10.0).floor() / 10.0, suffix)
        } else {
            format!("{}{}", value.floor() as u64, suffix)
        }
    }

    match n {
        0..=999 => n.to_string(),
        1_000..=999_999 => scaled(n, 1_000, "k"),
        1_000_000..=999_999_999 => scaled(n, 1_000_000, "M"),
        _ => scaled(n, 1_000_000_000, "B"),
    }
}

/// Render a millisecond Unix timestamp in the given time zone
pub fn timestamp<Tz>(ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string())
}
