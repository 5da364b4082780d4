// Config loading and validation tests

use farmreport::config::AppConfig;

const VALID_CONFIG: &str = r#"
[reporting]
hourly_threshold_hours = 72

[[periods]]
label = "24h"
hours = 24
rolling = true

[[periods]]
label = "7d"
hours = 168
rolling = false

[[periods]]
label = "cycle"
hours = -1
rolling = false
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.reporting.hourly_threshold_hours, 72);
    assert_eq!(config.periods.len(), 3);
    assert_eq!(config.periods[0].label, "24h");
    assert!(config.periods[0].rolling);
    assert_eq!(config.periods[2].hours, -1);
}

#[test]
fn test_config_period_lookup_by_label() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("valid");
    let period = config.period("7d").expect("7d preset");
    assert_eq!(period.hours, 168);
    assert!(!period.rolling);
    assert!(config.period("30d").is_none());
}

#[test]
fn test_config_validation_rejects_threshold_zero() {
    let bad = VALID_CONFIG.replace("hourly_threshold_hours = 72", "hourly_threshold_hours = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("hourly_threshold_hours"));
}

#[test]
fn test_config_validation_rejects_empty_periods() {
    let bad = "periods = []\n\n[reporting]\nhourly_threshold_hours = 72\n";
    let err = AppConfig::load_from_str(bad).unwrap_err();
    assert!(err.to_string().contains("periods"));
}

#[test]
fn test_config_validation_rejects_empty_label() {
    let bad = VALID_CONFIG.replace("label = \"24h\"", "label = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("periods.label"));
}

#[test]
fn test_config_validation_rejects_duplicate_label() {
    let bad = VALID_CONFIG.replace("label = \"7d\"", "label = \"24h\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("duplicated"));
}

#[test]
fn test_config_validation_rejects_zero_hours() {
    let bad = VALID_CONFIG.replace("hours = 24", "hours = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("periods.hours"));
}

#[test]
fn test_config_validation_rejects_hours_below_sentinel() {
    let bad = VALID_CONFIG.replace("hours = -1", "hours = -2");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("periods.hours"));
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load();
    unsafe { std::env::remove_var("CONFIG_FILE") };
    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.reporting.hourly_threshold_hours, 72);
    assert_eq!(config.periods.len(), 3);
}
