// UTC calendar arithmetic on epoch milliseconds. Window and bucket math both
// go through these helpers so boundaries stay aligned.

use chrono::{DateTime, NaiveDate};

pub const MS_PER_HOUR: i64 = 3_600_000;
pub const MS_PER_DAY: i64 = 86_400_000;

/// Floors a timestamp to the top of its hour.
pub fn truncate_to_hour(ts_ms: i64) -> i64 {
    ts_ms.div_euclid(MS_PER_HOUR) * MS_PER_HOUR
}

/// Floors a timestamp to 00:00:00.000 UTC of its day.
pub fn truncate_to_day(ts_ms: i64) -> i64 {
    ts_ms.div_euclid(MS_PER_DAY) * MS_PER_DAY
}

/// 00:00:00.000 UTC of the timestamp's day.
pub fn start_of_day(ts_ms: i64) -> i64 {
    truncate_to_day(ts_ms)
}

/// 23:59:59.999 UTC of the timestamp's day.
pub fn end_of_day(ts_ms: i64) -> i64 {
    truncate_to_day(ts_ms) + MS_PER_DAY - 1
}

/// UTC calendar date of a timestamp. Out-of-range timestamps degrade to the
/// epoch date rather than failing.
pub fn date_of(ts_ms: i64) -> NaiveDate {
    DateTime::from_timestamp_millis(ts_ms)
        .unwrap_or_default()
        .date_naive()
}

/// Hour of day (0..=23) of a timestamp.
pub fn hour_of(ts_ms: i64) -> u32 {
    ts_ms.div_euclid(MS_PER_HOUR).rem_euclid(24) as u32
}

/// Whole hours elapsed since 00:00 UTC of the reference time's day.
pub fn hours_elapsed_today(now_ms: i64) -> i64 {
    (now_ms - truncate_to_day(now_ms)) / MS_PER_HOUR
}
