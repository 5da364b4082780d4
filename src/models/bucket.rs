// Output slot of the bucketized series: one row per day or hour in the window.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::timeutil::{date_of, hour_of};

/// One slot of the output series. `values` maps metric name (or location id
/// when bucketizing across areas) to the value written for this slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBucket {
    /// Canonical slot key, stable for chart x-axis domains.
    pub bucket_key: String,
    /// Day start or hour start the slot represents, epoch milliseconds UTC.
    pub display_at_ms: i64,
    pub is_hourly: bool,
    /// True iff at least one value was written into this slot.
    pub has_data: bool,
    pub values: BTreeMap<String, f64>,
}

impl TimeBucket {
    pub(crate) fn empty(ts_ms: i64, is_hourly: bool) -> Self {
        let date = date_of(ts_ms);
        let hour = is_hourly.then(|| hour_of(ts_ms));
        TimeBucket {
            bucket_key: Self::key_for(date, hour),
            display_at_ms: ts_ms,
            is_hourly,
            has_data: false,
            values: BTreeMap::new(),
        }
    }

    /// Canonical slot key: `YYYY-MM-DD` daily, `YYYY-MM-DD#HH` hourly.
    pub fn key_for(date: NaiveDate, hour: Option<u32>) -> String {
        match hour {
            Some(h) => format!("{}#{:02}", date.format("%Y-%m-%d"), h),
            None => date.format("%Y-%m-%d").to_string(),
        }
    }
}
