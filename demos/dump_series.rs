// Resolve one period against fetched data and dump the bucketized series as JSON.
//
// Usage: cargo run --example dump_series -- [DATA_PATH] [PERIOD_LABEL]
//   DATA_PATH     default: ./data/sample.json
//   PERIOD_LABEL  default: first period in config
//
// DATA_PATH holds {"schedules": [...], "records": [...]} as fetched from the store.

use std::env;

use farmreport::config::AppConfig;
use farmreport::models::{MeasurementRecord, Schedule};
use farmreport::report;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SampleData {
    schedules: Vec<Schedule>,
    records: Vec<MeasurementRecord>,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = env::args().collect();
    let path = args
        .get(1)
        .map(String::as_str)
        .unwrap_or("./data/sample.json");

    let config = AppConfig::load()?;
    let period = match args.get(2) {
        Some(label) => config
            .period(label)
            .ok_or_else(|| anyhow::anyhow!("unknown period label: {}", label))?,
        None => config
            .periods
            .first()
            .ok_or_else(|| anyhow::anyhow!("no periods configured"))?,
    };

    let data: SampleData = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    let now = chrono::Utc::now();

    match report::build_series(
        &data.schedules,
        period.hours,
        period.rolling,
        &data.records,
        config.reporting.hourly_threshold_hours,
        false,
        now,
    ) {
        Some(series) => println!("{}", serde_json::to_string_pretty(&series)?),
        None => println!("no active schedule at {}", now),
    }
    Ok(())
}
