// Hourly vs daily decision: a window renders hourly when it is short enough
// and the scoped records actually carry hourly history.

use crate::models::MeasurementRecord;
use crate::timeutil::MS_PER_HOUR;

/// True iff the window is at most `threshold_hours` long and the scoped
/// records carry enough hourly data.
pub fn is_hourly_granularity(
    window_start_ms: i64,
    window_end_ms: i64,
    threshold_hours: i64,
    insufficient_hourly_data: bool,
) -> bool {
    window_end_ms - window_start_ms <= threshold_hours * MS_PER_HOUR && !insufficient_hourly_data
}

/// Data-sufficiency gate for hourly rendering: insufficient when there are
/// no records at all, or no populated hourly entries across primary
/// (supply) records. Callers pass records already scoped to the window
/// under evaluation.
pub fn has_insufficient_hourly_data(records: &[MeasurementRecord]) -> bool {
    if records.is_empty() {
        return true;
    }
    records
        .iter()
        .filter(|r| r.metric.is_primary())
        .map(|r| r.hourly_entry_count())
        .sum::<usize>()
        == 0
}
