// Reporting pipeline: schedules + period -> window -> granularity -> buckets.
// Every entry point is a pure function of its inputs plus an injected
// reference time; callers own fetching, polling and rendering.

mod bucketize;
mod granularity;
mod window;

pub use bucketize::{EdgeTrim, bucketize, edge_trim};
pub use granularity::{has_insufficient_hourly_data, is_hourly_granularity};
pub use window::{WHOLE_CYCLE, Window, resolve_window};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{MeasurementRecord, Schedule, TimeBucket, active_schedule};
use crate::timeutil::date_of;

/// A resolved report: the window actually used and its bucketized series.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSeries {
    pub window: Window,
    pub buckets: Vec<TimeBucket>,
}

/// Builds the series for one period request: active schedule, daily window,
/// granularity over the window-scoped records, hourly re-resolution when the
/// window qualifies, edge trim, bucketize.
///
/// `None` when no schedule is active at `now` or the period does not resolve.
pub fn build_series(
    schedules: &[Schedule],
    period_hours: i64,
    rolling: bool,
    records: &[MeasurementRecord],
    threshold_hours: i64,
    by_location: bool,
    now: DateTime<Utc>,
) -> Option<ReportSeries> {
    let schedule = active_schedule(schedules, now)?;
    let daily = resolve_window(schedule, period_hours, rolling, false, now)?;

    let scoped = records_in_window(records, &daily);
    let insufficient = has_insufficient_hourly_data(&scoped);
    let hourly = is_hourly_granularity(daily.start_ms, daily.end_ms, threshold_hours, insufficient);

    let window = if hourly {
        resolve_window(schedule, period_hours, rolling, true, now)?
    } else {
        daily
    };
    let trim = edge_trim(period_hours, threshold_hours, now);
    let buckets = bucketize(records, &window, by_location, trim, now);

    Some(ReportSeries { window, buckets })
}

/// Records whose date key falls within the window's span of days.
fn records_in_window(records: &[MeasurementRecord], window: &Window) -> Vec<MeasurementRecord> {
    let first = date_of(window.start_ms);
    let last = date_of(window.end_ms);
    records
        .iter()
        .filter(|r| first <= r.key.date && r.key.date <= last)
        .cloned()
        .collect()
}
