//! Timestamp utilities
//!
//! Show times are naive date-times interpreted as UTC.

use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Accepted textual layouts besides RFC 3339
const LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Get current UTC timestamp
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Parse a textual timestamp
///
/// Accepts RFC 3339 (converted to UTC), `YYYY-MM-DD HH:MM[:SS[.fff]]` with a
/// space or `T` separator, and a bare `YYYY-MM-DD` (midnight).
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_utc());
    }

    for layout in LAYOUTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, layout) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| Error::InvalidInput(format!("Unrecognized timestamp: {:?}", value)))
}
