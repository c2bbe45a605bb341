//! Time-related utilities.
//!
//! All timestamps in the wire protocol and the stored entities are Unix epoch
//! milliseconds in UTC.

use chrono::{TimeZone, Utc};

/// Get the current Unix timestamp in UTC (milliseconds)
pub fn now_epoch_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a Unix timestamp (milliseconds) to UTC RFC 3339 format
pub fn epoch_millis_to_rfc3339(timestamp_millis: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_millis)
        .single()
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| "invalid-timestamp".to_string())
}
