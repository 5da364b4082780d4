// Domain models: growth-cycle schedules, measurement records, output buckets

mod bucket;
mod keys;
mod measurement;
mod schedule;

pub use bucket::TimeBucket;
pub use keys::{KeyError, LocationId, MeasurementKey, MetricKind, RecordDateKey};
pub use measurement::{MeasurementRecord, parse_metric_value};
pub use schedule::{Schedule, active_schedule};
