use serde::Deserialize;

use crate::report::WHOLE_CYCLE;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub reporting: ReportingConfig,
    pub periods: Vec<PeriodConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportingConfig {
    /// Windows at most this long render hourly buckets, given enough hourly data.
    pub hourly_threshold_hours: i64,
}

/// One period preset offered by the dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodConfig {
    pub label: String,
    /// Period length in hours; -1 selects the whole growth cycle.
    pub hours: i64,
    /// Rolling windows track the current time; fixed windows step from the cycle start.
    pub rolling: bool,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Period preset by label.
    pub fn period(&self, label: &str) -> Option<&PeriodConfig> {
        self.periods.iter().find(|p| p.label == label)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.reporting.hourly_threshold_hours > 0,
            "reporting.hourly_threshold_hours must be > 0, got {}",
            self.reporting.hourly_threshold_hours
        );
        anyhow::ensure!(!self.periods.is_empty(), "periods must be non-empty");
        let mut seen = std::collections::HashSet::new();
        for period in &self.periods {
            anyhow::ensure!(!period.label.is_empty(), "periods.label must be non-empty");
            anyhow::ensure!(
                seen.insert(period.label.as_str()),
                "periods.label {} is duplicated",
                period.label
            );
            anyhow::ensure!(
                period.hours == WHOLE_CYCLE || period.hours > 0,
                "periods.hours must be > 0 or {} (whole cycle), got {} for {}",
                WHOLE_CYCLE,
                period.hours,
                period.label
            );
        }
        Ok(())
    }
}
