// One persisted reading. hourly_history is carried as the raw JSON text the
// store holds; corrupt JSON means no hourly data for the record, never an
// error for the caller.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{KeyError, MeasurementKey, MetricKind, RecordDateKey};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementRecord {
    /// Date + location, from the store's sort key. Bucketizing filters on
    /// this date, not on created_at.
    pub key: RecordDateKey,
    pub metric: MetricKind,
    pub created_at: DateTime<Utc>,
    /// Representative value for the whole day.
    pub daily_average: Option<f64>,
    /// Last known value for the day.
    pub daily_latest: Option<f64>,
    /// Raw JSON object mapping two-digit hour-of-day ("00".."23") to a
    /// number or numeric string; absent when the record has no intra-day history.
    pub hourly_history: Option<String>,
}

impl MeasurementRecord {
    /// Builds a record from the store's raw item keys plus its value fields.
    /// This is the only place raw key strings enter the crate.
    pub fn from_store_keys(
        partition_key: &str,
        sort_key: &str,
        created_at: DateTime<Utc>,
        daily_average: Option<f64>,
        daily_latest: Option<f64>,
        hourly_history: Option<String>,
    ) -> Result<Self, KeyError> {
        let partition: MeasurementKey = partition_key.parse()?;
        let key: RecordDateKey = sort_key.parse()?;
        Ok(MeasurementRecord {
            key,
            metric: partition.metric,
            created_at,
            daily_average,
            daily_latest,
            hourly_history,
        })
    }

    /// Parsed intra-day history: hour of day -> value. Entries with an
    /// unparsable hour key are skipped; unparsable values become 0.0.
    pub fn hourly_entries(&self) -> BTreeMap<u32, f64> {
        self.raw_hourly_entries()
            .iter()
            .filter_map(|(hour, value)| {
                hour.parse::<u32>()
                    .ok()
                    .map(|h| (h, parse_metric_value(value)))
            })
            .collect()
    }

    /// Number of populated hourly-history entries.
    pub fn hourly_entry_count(&self) -> usize {
        self.raw_hourly_entries().len()
    }

    /// Last known value for the day, preferring the explicit daily latest.
    pub fn latest_value(&self) -> Option<f64> {
        self.daily_latest.or(self.daily_average)
    }

    fn raw_hourly_entries(&self) -> BTreeMap<String, serde_json::Value> {
        let Some(raw) = &self.hourly_history else {
            return BTreeMap::new();
        };
        serde_json::from_str(raw).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "hourly history parse failed, treating as empty");
            BTreeMap::new()
        })
    }
}

/// Numeric-or-numeric-string metric values. Strings are parsed as fractions
/// when they carry a decimal point and as integers otherwise; anything
/// unparsable is 0.0, never NaN.
pub fn parse_metric_value(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => {
            let s = s.trim();
            if s.contains('.') {
                s.parse::<f64>().unwrap_or(0.0)
            } else {
                s.parse::<i64>().map(|v| v as f64).unwrap_or(0.0)
            }
        }
        _ => 0.0,
    }
}
