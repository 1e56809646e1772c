//! Lenient ISO-8601 date parsing.
//!
//! Check-in/check-out values and special discount windows arrive as strings.
//! Anything unparseable becomes `None`, which callers treat as "no overlap".

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a calendar date or timestamp into a UTC instant.
///
/// Accepts `YYYY-MM-DD` (midnight UTC), RFC 3339 timestamps, and naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` timestamps (read as UTC).
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }

    tracing::trace!(value = raw, "unparseable date");
    None
}

/// Whole nights between two instants (negative when reversed).
pub fn nights_between(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> i64 {
    (check_out - check_in).num_days()
}
