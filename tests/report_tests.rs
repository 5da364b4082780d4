// End-to-end pipeline tests: build_series composition of window resolution,
// granularity and bucketizing

use chrono::{DateTime, TimeZone, Utc};
use farmreport::models::{MeasurementRecord, MetricKind, Schedule};
use farmreport::report::{WHOLE_CYCLE, build_series};

const THRESHOLD_HOURS: i64 = 72;

fn schedule() -> Schedule {
    Schedule {
        cycle_started_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        cycle_completing_at: Utc.with_ymd_and_hms(2024, 1, 10, 23, 59, 59).unwrap(),
        cycle_completed_at: None,
    }
}

fn record(date: &str) -> MeasurementRecord {
    MeasurementRecord {
        key: format!("{date}#barn-1").parse().unwrap(),
        metric: MetricKind::Supply,
        created_at: Utc.with_ymd_and_hms(2024, 1, 3, 8, 0, 0).unwrap(),
        daily_average: None,
        daily_latest: None,
        hourly_history: None,
    }
}

fn ms(y: i32, mo: u32, d: u32, h: u32) -> i64 {
    Utc.with_ymd_and_hms(y, mo, d, h, 0, 0)
        .unwrap()
        .timestamp_millis()
}

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

#[test]
fn short_period_with_hourly_data_builds_an_hourly_series() {
    let mut r = record("2024-01-03");
    r.hourly_history = Some(r#"{"10": "68"}"#.into());
    let now = at(2024, 1, 3, 12, 30);

    let series = build_series(
        &[schedule()],
        48,
        true,
        &[r],
        THRESHOLD_HOURS,
        false,
        now,
    )
    .expect("series");

    assert!(series.window.is_hourly);
    // Hourly re-resolution shifts the start one hour past the raw 48h reach.
    assert_eq!(series.window.start_ms, ms(2024, 1, 1, 13));
    assert_eq!(series.window.end_ms, ms(2024, 1, 3, 12));
    assert_eq!(series.buckets.len(), 48);
    let ten = series
        .buckets
        .iter()
        .find(|b| b.bucket_key == "2024-01-03#10")
        .unwrap();
    assert_eq!(ten.values["SUPPLY"], 68.0);
    assert!(ten.has_data);
}

#[test]
fn short_period_without_hourly_data_falls_back_to_daily() {
    let mut r = record("2024-01-02");
    r.daily_average = Some(70.0);
    let now = at(2024, 1, 3, 12, 30);

    let series = build_series(
        &[schedule()],
        48,
        true,
        &[r],
        THRESHOLD_HOURS,
        false,
        now,
    )
    .expect("series");

    assert!(!series.window.is_hourly);
    assert_eq!(series.window.start_ms, ms(2024, 1, 1, 12));
    assert_eq!(series.window.end_ms, ms(2024, 1, 3, 12));
    assert_eq!(series.buckets.len(), 3);
    assert_eq!(series.buckets[1].bucket_key, "2024-01-02");
    assert_eq!(series.buckets[1].values["SUPPLY"], 70.0);
}

#[test]
fn fixed_weekly_period_builds_daily_buckets() {
    let mut r = record("2024-01-08");
    r.daily_average = Some(64.0);
    let now = at(2024, 1, 9, 0, 0);

    let series = build_series(
        &[schedule()],
        168,
        false,
        &[r],
        THRESHOLD_HOURS,
        false,
        now,
    )
    .expect("series");

    assert!(!series.window.is_hourly);
    assert_eq!(series.window.start_ms, ms(2024, 1, 8, 0));
    assert_eq!(series.window.end_ms, ms(2024, 1, 10, 0));
    // Whole-day period: no edge trim.
    assert_eq!(series.buckets.len(), 3);
    assert_eq!(series.buckets[0].values["SUPPLY"], 64.0);
}

#[test]
fn partial_day_period_trims_one_edge_bucket() {
    let mut r = record("2024-01-03");
    r.daily_average = Some(70.0);
    // 84h = 3 days + 12h remainder; at 14:00 today has passed it.
    let now = at(2024, 1, 5, 14, 0);

    let series = build_series(
        &[schedule()],
        84,
        true,
        &[r],
        THRESHOLD_HOURS,
        false,
        now,
    )
    .expect("series");

    assert!(!series.window.is_hourly);
    assert_eq!(series.buckets.len(), 3);
    assert_eq!(series.buckets[0].bucket_key, "2024-01-03");
    assert_eq!(series.buckets.last().unwrap().bucket_key, "2024-01-05");
}

#[test]
fn whole_cycle_builds_a_daily_series_over_the_cycle() {
    let mut r = record("2024-01-04");
    r.daily_average = Some(58.5);
    let now = at(2024, 1, 5, 9, 0);

    let series = build_series(
        &[schedule()],
        WHOLE_CYCLE,
        false,
        &[r],
        THRESHOLD_HOURS,
        false,
        now,
    )
    .expect("series");

    assert!(!series.window.is_hourly);
    assert_eq!(series.buckets.len(), 10);
    assert_eq!(series.buckets[0].bucket_key, "2024-01-01");
    assert_eq!(series.buckets[9].bucket_key, "2024-01-10");
    assert_eq!(series.buckets[3].values["SUPPLY"], 58.5);
}

#[test]
fn no_active_schedule_yields_no_series() {
    let now = at(2024, 2, 1, 0, 0);
    let out = build_series(&[schedule()], 48, true, &[], THRESHOLD_HOURS, false, now);
    assert!(out.is_none());
}

#[test]
fn invalid_period_yields_no_series() {
    let now = at(2024, 1, 3, 12, 0);
    let out = build_series(&[schedule()], 0, true, &[], THRESHOLD_HOURS, false, now);
    assert!(out.is_none());
}

#[test]
fn no_records_yield_a_series_with_no_buckets() {
    let now = at(2024, 1, 3, 12, 0);
    let series = build_series(&[schedule()], 48, true, &[], THRESHOLD_HOURS, false, now)
        .expect("window still resolves");
    assert!(series.buckets.is_empty());
}
