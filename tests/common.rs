#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, FixedOffset, TimeZone};
use ctscan_tracker::db::initialize::init_db;
use ctscan_tracker::db::pool::DbPool;
use ctscan_tracker::db::store::SqliteEventStore;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn cts() -> Command {
    cargo_bin_cmd!("ctscan-tracker")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_ctscan.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    fs::remove_file(format!("{}-wal", db_path)).ok();
    fs::remove_file(format!("{}-shm", db_path)).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh, migrated SQLite store for library-level tests.
pub fn sqlite_store(name: &str) -> (SqliteEventStore, String) {
    let db_path = setup_test_db(name);
    let pool = DbPool::new(&db_path).expect("open db");
    init_db(&pool.conn, cest()).expect("init db");
    (SqliteEventStore::new(pool), db_path)
}

/// Initialize a DB through the CLI in test mode (no config file written).
pub fn init_cli_db(db_path: &str) {
    cts()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn cest() -> FixedOffset {
    FixedOffset::east_opt(2 * 3600).expect("valid offset")
}

/// Instant in +02:00.
pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<FixedOffset> {
    cest()
        .with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .expect("valid instant")
}

/// Wide CSV with a finished sample7 plan on 10.06.2025 and one tracked scan.
pub fn past_plan_csv(name: &str) -> String {
    let path = temp_out(name, "csv");
    let mut content = String::from("sample7_plan,sample7_track\n");
    content.push_str("10.06.2025 08:00:00+0200,10.06.2025 08:00:40+0200\n");
    for hour in 9..=20 {
        content.push_str(&format!("10.06.2025 {:02}:00:00+0200,\n", hour));
    }
    fs::write(&path, content).expect("write csv");
    path
}

/// Replace the scans of a CLI-initialized DB with `past_plan_csv`.
pub fn seed_past_plan(db_path: &str, name: &str) {
    let csv = past_plan_csv(name);
    cts()
        .args(["--db", db_path, "restore", "--file", &csv, "--yes"])
        .assert()
        .success();
}
