//! Timestamp generation and minute-precision rendering for conversation turns.

use chrono::{DateTime, Local, NaiveDateTime};

/// Format used for rendered timestamps (minute precision).
const MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Naive ISO-8601 layouts accepted when reading stored timestamps.
const NAIVE_LAYOUTS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Current local time as a naive ISO-8601 string with microseconds.
///
/// Matches the layout of memory files written by earlier tooling, e.g.
/// `2025-03-14T09:26:53.589793`.
pub fn now_iso() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Render a stored timestamp truncated to minute precision (`YYYY-MM-DD HH:MM`).
///
/// Accepts RFC 3339 strings (offset kept as written) and naive ISO-8601
/// strings. Anything unparseable is returned unchanged rather than dropped.
pub fn to_minute(timestamp: &str) -> String {
    let trimmed = timestamp.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.format(MINUTE_FORMAT).to_string();
    }

    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(trimmed, layout).ok())
        .map(|dt| dt.format(MINUTE_FORMAT).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}
