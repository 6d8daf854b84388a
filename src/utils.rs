//! Utility functions for the fencing ladder

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use uuid::Uuid;

/// Generate a new unique fencer or bout ID
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Whole calendar months between `then` and `now` in the club's time zone,
/// ignoring day of month.
///
/// Negative when `then` lies in a later month than `now`.
pub fn months_between(now: DateTime<Utc>, then: DateTime<Utc>, offset: FixedOffset) -> i32 {
    let (now, then) = (now.with_timezone(&offset), then.with_timezone(&offset));
    (now.year() - then.year()) * 12 + (now.month() as i32 - then.month() as i32)
}

/// Calendar date a timestamp falls on in the club's time zone
pub fn calendar_date(timestamp: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    timestamp.with_timezone(&offset).date_naive()
}

/// Parse a bout date given either as `YYYY-MM-DD` (midnight at `offset`) or RFC 3339
pub fn parse_bout_date(input: &str, offset: FixedOffset) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return offset
            .from_local_datetime(&date.and_time(NaiveTime::MIN))
            .single()
            .map(|dt| dt.with_timezone(&Utc));
    }
    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
