// Re-buckets irregular measurement records into a dense, gap-filled series.
// Record dates come from the store's sort key, not created_at.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};

use super::window::Window;
use crate::models::{MeasurementRecord, TimeBucket};
use crate::timeutil::{MS_PER_DAY, MS_PER_HOUR, date_of, hours_elapsed_today};

/// Which boundary bucket a partial period drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeTrim {
    First,
    Last,
}

/// Partial-boundary rule: periods longer than the hourly threshold that are
/// not whole days drop one edge bucket - the first when today's elapsed
/// hours exceed the period's hour-of-day remainder, the last otherwise.
/// Whole-cycle and hourly-scale periods never trim; at most one edge ever is.
pub fn edge_trim(
    period_hours: i64,
    threshold_hours: i64,
    now: DateTime<Utc>,
) -> Option<EdgeTrim> {
    if period_hours <= threshold_hours {
        return None;
    }
    let remainder = period_hours % 24;
    if remainder == 0 {
        return None;
    }
    if hours_elapsed_today(now.timestamp_millis()) > remainder {
        Some(EdgeTrim::First)
    } else {
        Some(EdgeTrim::Last)
    }
}

/// Buckets records into the window's slots. Output is dense and ordered;
/// slots without data stay in place with `has_data = false`. An empty
/// record set yields an empty series (generation is skipped entirely).
///
/// Values land under the record's metric name, or under its location id
/// when `by_location` is set (one metric across areas). Multiple records
/// hitting the same slot and name: last write in scan order wins. Records
/// whose target slot does not exist are dropped silently.
pub fn bucketize(
    records: &[MeasurementRecord],
    window: &Window,
    by_location: bool,
    trim: Option<EdgeTrim>,
    now: DateTime<Utc>,
) -> Vec<TimeBucket> {
    if records.is_empty() {
        return Vec::new();
    }

    let step_ms = if window.is_hourly {
        MS_PER_HOUR
    } else {
        MS_PER_DAY
    };
    let mut buckets: Vec<TimeBucket> = Vec::new();
    let mut ts = window.start_ms;
    while ts <= window.end_ms {
        buckets.push(TimeBucket::empty(ts, window.is_hourly));
        ts += step_ms;
    }

    match trim {
        Some(EdgeTrim::First) if !buckets.is_empty() => {
            buckets.remove(0);
        }
        Some(EdgeTrim::Last) => {
            buckets.pop();
        }
        _ => {}
    }

    let index: HashMap<String, usize> = buckets
        .iter()
        .enumerate()
        .map(|(i, b)| (b.bucket_key.clone(), i))
        .collect();
    let dates: HashSet<NaiveDate> = buckets.iter().map(|b| date_of(b.display_at_ms)).collect();
    let today = now.date_naive();

    for record in records {
        if !dates.contains(&record.key.date) {
            continue;
        }
        let value_name = if by_location {
            record.key.location.to_string()
        } else {
            record.metric.to_string()
        };

        if window.is_hourly {
            // Future-dated rows (synthetic test data) carry hourly history
            // that must not land in today's chart.
            if record.key.date > today {
                continue;
            }
            for (hour, value) in record.hourly_entries() {
                let key = TimeBucket::key_for(record.key.date, Some(hour));
                if let Some(&i) = index.get(&key) {
                    let bucket = &mut buckets[i];
                    bucket.values.insert(value_name.clone(), value);
                    if value != 0.0 {
                        bucket.has_data = true;
                    }
                }
            }
        } else if let Some(average) = record.daily_average {
            let key = TimeBucket::key_for(record.key.date, None);
            if let Some(&i) = index.get(&key) {
                let bucket = &mut buckets[i];
                bucket.values.insert(value_name, average);
                bucket.has_data = true;
            }
        }
    }

    buckets
}
