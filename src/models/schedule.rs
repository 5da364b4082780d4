// Growth-cycle schedule for a tracked area. Read-only input; instants come
// from the external store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Cycle start, inclusive.
    pub cycle_started_at: DateTime<Utc>,
    /// Expected end.
    pub cycle_completing_at: DateTime<Utc>,
    /// Actual end, set only once the cycle has concluded.
    pub cycle_completed_at: Option<DateTime<Utc>>,
}

impl Schedule {
    /// Actual end when the cycle has concluded, expected end otherwise.
    pub fn end_instant(&self) -> DateTime<Utc> {
        self.cycle_completed_at.unwrap_or(self.cycle_completing_at)
    }

    /// An active schedule has not concluded and contains `now`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.cycle_completed_at.is_none()
            && self.cycle_started_at <= now
            && now <= self.cycle_completing_at
    }
}

/// First active schedule in input order. At most one is expected per area;
/// the first match wins when the data violates that, with a warning.
pub fn active_schedule(schedules: &[Schedule], now: DateTime<Utc>) -> Option<&Schedule> {
    let active_count = schedules.iter().filter(|s| s.is_active_at(now)).count();
    if active_count > 1 {
        tracing::warn!(active_count, "multiple active schedules, using the first");
    }
    schedules.iter().find(|s| s.is_active_at(now))
}
