//! Timestamp parsing for filter-time comparisons.
//!
//! The ingestion source emits epoch milliseconds or ISO-8601 text; both
//! must convert to a comparable instant. The normalizer passes timestamps
//! through untouched, so all parsing lives here.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::memory::Timestamp;

/// Parse a raw timestamp into a UTC instant.
///
/// Integers and floats are epoch milliseconds; text follows
/// [`parse_bound`]. Returns `None` for unparseable values.
pub fn instant(ts: &Timestamp) -> Option<DateTime<Utc>> {
    match ts {
        Timestamp::Int(ms) => DateTime::from_timestamp_millis(*ms),
        Timestamp::Float(ms) => {
            if !ms.is_finite() {
                return None;
            }
            DateTime::from_timestamp_millis(*ms as i64)
        }
        Timestamp::Text(s) => parse_bound(s),
    }
}

/// Parse a date-or-datetime string into a UTC instant.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS` datetime (read as
/// UTC), or a bare `YYYY-MM-DD` date at UTC midnight.
pub fn parse_bound(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|n| n.and_utc());
    }

    None
}
