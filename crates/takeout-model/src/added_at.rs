use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;

/// Output format for the `addedAt` column.
pub const ADDED_AT_FORMAT: &str = "%Y/%m/%d";

/// Parse a `time_added` attribute value as Unix epoch seconds.
///
/// Missing or unparsable values (including out-of-range numbers) count as
/// epoch zero.
pub fn parse_time_added(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse::<i64>().ok()).unwrap_or(0)
}

/// Format epoch seconds as `YYYY/MM/DD` in the given time zone.
pub fn format_added_at<Tz>(epoch_secs: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    // Timestamps chrono cannot represent fall back to the epoch, like parse failures
    let instant = DateTime::<Utc>::from_timestamp(epoch_secs, 0).unwrap_or_default();
    instant.with_timezone(tz).format(ADDED_AT_FORMAT).to_string()
}
