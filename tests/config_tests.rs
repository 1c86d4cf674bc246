use chrono::FixedOffset;
use ctscan_tracker::config::Config;
use ctscan_tracker::config::migrate::migrate_config_file;
use ctscan_tracker::errors::AppError;
use ctscan_tracker::models::sample::TreatmentProfile;
use ctscan_tracker::utils::time::{parse_input_timestamp, parse_offset};
use std::fs;

mod common;
use common::{at, cest, temp_out};

#[test]
fn test_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.utc_offset, "+02:00");
    assert_eq!(cfg.initial_interval_minutes, 3);
    assert_eq!(cfg.samples.len(), 9);

    let s1 = cfg.sample("sample1").unwrap();
    assert_eq!(s1.initial_repetitions, 4);
    assert_eq!(s1.treatment_profile, TreatmentProfile::TwoStep);

    assert!(matches!(cfg.sample("sample10"), Err(AppError::UnknownSample(_))));
}

#[test]
fn test_partial_yaml_gets_defaults() {
    let yaml = r#"
database: /tmp/ctscan_partial.sqlite
samples:
  a1:
    temperature: "60°C"
    solution: "KOH"
    treatment_profile: "1 step"
    duration_hours: 6
  b2:
    temperature: "60°C"
    solution: "KOH"
    treatment_profile: one_step
    duration_hours: 0
    custom_intervals_minutes: [5, 10, 20]
"#;

    let cfg: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.countdown_refresh_secs, 1);
    assert_eq!(cfg.storage_retries, 3);
    assert_eq!(cfg.samples.len(), 2);

    let a1 = cfg.sample("a1").unwrap();
    assert_eq!(a1.initial_repetitions, 1);
    assert_eq!(a1.initial_interval_minutes, None);
    assert_eq!(a1.planned_count(), 7);

    let b2 = cfg.sample("b2").unwrap();
    assert_eq!(b2.treatment_profile, TreatmentProfile::OneStep);
    assert_eq!(b2.planned_count(), 4);
}

#[test]
fn test_offsets() {
    assert_eq!(parse_offset("+02:00").unwrap(), cest());
    assert_eq!(parse_offset("+0200").unwrap(), cest());
    assert_eq!(
        parse_offset("-05:30").unwrap(),
        FixedOffset::west_opt(5 * 3600 + 1800).unwrap()
    );
    assert_eq!(parse_offset("UTC").unwrap(), FixedOffset::east_opt(0).unwrap());
    assert!(parse_offset("local").is_ok());
    assert!(matches!(parse_offset("Europe/Berlin"), Err(AppError::Config(_))));
    assert!(parse_offset("+25:00").is_err());
}

#[test]
fn test_malformed_offsets_are_config_errors() {
    // four bytes, but the split point falls inside 'é'
    assert!(matches!(parse_offset("+1é2"), Err(AppError::Config(_))));
    assert!(matches!(parse_offset("+99999999:00"), Err(AppError::Config(_))));
    assert!(matches!(parse_offset("-00:99999999"), Err(AppError::Config(_))));
    assert!(matches!(parse_offset("+"), Err(AppError::Config(_))));
}

#[test]
fn test_operator_input_timestamps() {
    assert_eq!(
        parse_input_timestamp("10.06.2025 08:03:00", cest()).unwrap(),
        at(2025, 6, 10, 8, 3)
    );
    // explicit offset wins over the configured one
    let utc = FixedOffset::east_opt(0).unwrap();
    assert_eq!(
        parse_input_timestamp("10.06.2025 08:03:00+0200", utc).unwrap(),
        at(2025, 6, 10, 8, 3)
    );
    assert!(matches!(
        parse_input_timestamp("10/06/2025 08:03", cest()),
        Err(AppError::InvalidTimestamp(_))
    ));
}

#[test]
fn test_config_file_migration() {
    let path = temp_out("config_migration", "conf");
    fs::write(
        &path,
        r#"database: /tmp/ctscan_migration.sqlite
samples:
  sample1:
    temperature: "90°C"
    solution: "KOH"
    treatment_profile: "2 step"
    duration_hours: 24
    inital_repetitions: 4
"#,
    )
    .unwrap();

    let actions = migrate_config_file(std::path::Path::new(&path)).unwrap();
    assert!(actions.iter().any(|a| a.contains("utc_offset")));
    assert!(actions.iter().any(|a| a.contains("renamed inital_repetitions")));

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("# utc_offset options:"));
    assert!(content.contains("use +01:00 for a winter campaign"));

    let cfg: Config = serde_yaml::from_str(&content).unwrap();
    assert_eq!(cfg.sample("sample1").unwrap().initial_repetitions, 4);
    assert_eq!(cfg.busy_timeout_ms, 5000);

    // second run has nothing left to do
    let again = migrate_config_file(std::path::Path::new(&path)).unwrap();
    assert!(again.is_empty());
}

#[test]
fn test_resolve_db_path() {
    let abs = temp_out("resolve_db", "sqlite");
    assert_eq!(Config::resolve_db_path(&abs).to_string_lossy(), abs);
    assert_eq!(
        Config::resolve_db_path("custom.sqlite"),
        Config::config_dir().join("custom.sqlite")
    );
}
