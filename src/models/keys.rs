// Structured forms of the store's composite keys. Display/FromStr are the
// byte-for-byte serialization boundary; core logic never handles raw strings.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const PARTITION_PREFIX: &str = "MEASUREMENTBYAREA";
const LOCATION_TAG: &str = "LOC";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("key {0:?} is missing a segment")]
    MissingSegment(String),
    #[error("expected segment {expected:?}, got {got:?}")]
    BadSegment { expected: &'static str, got: String },
    #[error("invalid date segment {0:?}")]
    BadDate(String),
    #[error("unknown metric kind {0:?}")]
    UnknownMetric(String),
}

/// Measurement category. Supply is the primary kind for data-sufficiency checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricKind {
    Supply,
    Demand,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Supply => "SUPPLY",
            MetricKind::Demand => "DEMAND",
        }
    }

    pub fn is_primary(&self) -> bool {
        matches!(self, MetricKind::Supply)
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUPPLY" => Ok(MetricKind::Supply),
            "DEMAND" => Ok(MetricKind::Demand),
            other => Err(KeyError::UnknownMetric(other.to_string())),
        }
    }
}

/// Store identifier of a tracked area.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub String);

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationId {
    fn from(s: &str) -> Self {
        LocationId(s.to_string())
    }
}

/// Partition key: `MEASUREMENTBYAREA#<METRIC>#LOC#<location>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MeasurementKey {
    pub metric: MetricKind,
    pub location: LocationId,
}

impl fmt::Display for MeasurementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{PARTITION_PREFIX}#{}#{LOCATION_TAG}#{}",
            self.metric, self.location
        )
    }
}

impl FromStr for MeasurementKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.splitn(4, '#');
        let prefix = segments
            .next()
            .ok_or_else(|| KeyError::MissingSegment(s.to_string()))?;
        if prefix != PARTITION_PREFIX {
            return Err(KeyError::BadSegment {
                expected: PARTITION_PREFIX,
                got: prefix.to_string(),
            });
        }
        let metric = segments
            .next()
            .ok_or_else(|| KeyError::MissingSegment(s.to_string()))?
            .parse()?;
        let tag = segments
            .next()
            .ok_or_else(|| KeyError::MissingSegment(s.to_string()))?;
        if tag != LOCATION_TAG {
            return Err(KeyError::BadSegment {
                expected: LOCATION_TAG,
                got: tag.to_string(),
            });
        }
        let location = segments
            .next()
            .filter(|l| !l.is_empty())
            .ok_or_else(|| KeyError::MissingSegment(s.to_string()))?;
        Ok(MeasurementKey {
            metric,
            location: location.into(),
        })
    }
}

impl From<MeasurementKey> for String {
    fn from(key: MeasurementKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for MeasurementKey {
    type Error = KeyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Sort key: `<YYYY-MM-DD>#<locationId>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RecordDateKey {
    pub date: NaiveDate,
    pub location: LocationId,
}

impl fmt::Display for RecordDateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.date.format(DATE_FORMAT), self.location)
    }
}

impl FromStr for RecordDateKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (date, location) = s
            .split_once('#')
            .ok_or_else(|| KeyError::MissingSegment(s.to_string()))?;
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| KeyError::BadDate(date.to_string()))?;
        if location.is_empty() {
            return Err(KeyError::MissingSegment(s.to_string()));
        }
        Ok(RecordDateKey {
            date,
            location: location.into(),
        })
    }
}

impl From<RecordDateKey> for String {
    fn from(key: RecordDateKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for RecordDateKey {
    type Error = KeyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
