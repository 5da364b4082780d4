// Window resolution against a growth-cycle schedule. All arithmetic is UTC
// epoch milliseconds; the reference time is always passed in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Schedule;
use crate::timeutil::{MS_PER_HOUR, end_of_day, start_of_day, truncate_to_day, truncate_to_hour};

/// Sentinel period meaning "the whole cycle".
pub const WHOLE_CYCLE: i64 = -1;

/// A resolved reporting interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    pub start_ms: i64,
    pub end_ms: i64,
    pub is_hourly: bool,
}

impl Window {
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }
}

/// Resolves the concrete window for one period request against a schedule.
///
/// `WHOLE_CYCLE` spans start-of-day of the cycle start to end-of-day of the
/// cycle end. Otherwise `now` is truncated to the top of the hour and the
/// schedule bounds to day boundaries (hour boundaries when `is_hourly`):
/// rolling windows end at `min(schedule end, now)` and reach one period
/// back, clamped into the schedule; fixed windows step in whole periods
/// from the schedule start and take the last step that began by `now`.
/// Hourly windows start one hour after the raw arithmetic so the boundary
/// bucket is not shared with the previous window.
///
/// A period of zero or below `WHOLE_CYCLE` resolves to `None`.
pub fn resolve_window(
    schedule: &Schedule,
    period_hours: i64,
    rolling: bool,
    is_hourly: bool,
    now: DateTime<Utc>,
) -> Option<Window> {
    if period_hours == WHOLE_CYCLE {
        return Some(Window {
            start_ms: start_of_day(schedule.cycle_started_at.timestamp_millis()),
            end_ms: end_of_day(schedule.end_instant().timestamp_millis()),
            is_hourly,
        });
    }
    if period_hours <= 0 {
        return None;
    }

    let now_ms = truncate_to_hour(now.timestamp_millis());
    let period_ms = period_hours * MS_PER_HOUR;
    let truncate = if is_hourly {
        truncate_to_hour
    } else {
        truncate_to_day
    };
    let sched_start = truncate(schedule.cycle_started_at.timestamp_millis());
    let sched_end = truncate(schedule.end_instant().timestamp_millis());

    let (mut start_ms, end_ms) = if rolling {
        let end = now_ms.min(sched_end);
        let candidate = now_ms - period_ms;
        let start = if candidate < sched_start {
            sched_start
        } else if now_ms > sched_end {
            sched_end - period_ms
        } else {
            candidate
        };
        (start, end)
    } else {
        let mut step = sched_start;
        while step + period_ms <= now_ms && step + period_ms <= sched_end {
            step += period_ms;
        }
        (step, (step + period_ms).min(sched_end))
    };

    if is_hourly {
        start_ms += MS_PER_HOUR;
    }

    Some(Window {
        start_ms,
        end_ms,
        is_hourly,
    })
}
