use ctscan_tracker::core::backup::{BackupLogic, read_table_csv};
use ctscan_tracker::db::store::EventStore;
use ctscan_tracker::errors::AppError;
use ctscan_tracker::models::column::ColumnKey;
use predicates::str::contains;
use std::fs;
use std::path::Path;

mod common;
use common::{cest, cts, init_cli_db, seed_past_plan, setup_test_db, sqlite_store, temp_out};

fn seeded_db(name: &str) -> String {
    let db_path = setup_test_db(name);
    init_cli_db(&db_path);
    seed_past_plan(&db_path, name);
    db_path
}

#[test]
fn test_export_csv_long_layout() {
    let db_path = seeded_db("export_csv_long");
    let out = temp_out("export_csv_long", "csv");

    cts()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read csv");
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("sample,source,timestamp"));
    assert_eq!(lines.next(), Some("sample7,planned,10.06.2025 08:00:00+0200"));
    assert_eq!(lines.next(), Some("sample7,tracked,10.06.2025 08:00:40+0200"));
    // 13 planned + 1 tracked
    assert_eq!(content.lines().count(), 15);
}

#[test]
fn test_export_json_filtered_by_source() {
    let db_path = seeded_db("export_json_tracked");
    let out = temp_out("export_json_tracked", "json");

    cts()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &out, "--source",
            "tracked",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read json");
    let value: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let items = value.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["sample"], "sample7");
    assert_eq!(items[0]["source"], "tracked");
    assert_eq!(items[0]["timestamp"], "10.06.2025 08:00:40+0200");
}

#[test]
fn test_export_wide_json_keeps_columns() {
    let db_path = seeded_db("export_json_wide");
    let out = temp_out("export_json_wide", "json");

    cts()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &out, "--wide",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read json");
    let value: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(value["sample7_plan"].as_array().map(Vec::len), Some(13));
    assert_eq!(value["sample7_track"][0], "10.06.2025 08:00:40+0200");
    assert!(value["sample7_track"][1].is_null());
}

#[test]
fn test_export_xlsx_writes_file() {
    let db_path = seeded_db("export_xlsx");
    let out = temp_out("export_xlsx", "xlsx");

    cts()
        .args(["--db", &db_path, "export", "--format", "xlsx", "--file", &out])
        .assert()
        .success()
        .stdout(contains("XLSX export completed"));

    assert!(fs::metadata(&out).map(|m| m.len() > 0).unwrap_or(false));
}

#[test]
fn test_wide_export_then_restore_into_new_db() {
    let db_path = seeded_db("export_restore_src");
    let out = temp_out("export_restore", "csv");

    cts()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--wide",
        ])
        .assert()
        .success();

    let header = fs::read_to_string(&out).expect("read csv");
    assert!(header.starts_with("sample7_plan,sample7_track"));

    let target = setup_test_db("export_restore_dst");
    init_cli_db(&target);

    cts()
        .args(["--db", &target, "restore", "--file", &out, "--yes"])
        .assert()
        .success()
        .stdout(contains("Restored 2 column(s), 13 row(s)"));

    cts()
        .args(["--db", &target, "timeline", "--sample", "sample7"])
        .assert()
        .success()
        .stdout(contains("10.06.2025 08:00:40+0200"))
        .stdout(contains("14 scan(s)"));

    // restored plan still blocks a second start
    cts()
        .args(["--db", &target, "start", "sample7"])
        .assert()
        .success()
        .stdout(contains("already been initialized"));
}

#[test]
fn test_restore_missing_file_keeps_data() {
    let (store, _) = sqlite_store("restore_missing");
    store
        .append_or_fill(&ColumnKey::track("sample1"), "10.06.2025 08:00:00+0200")
        .unwrap();

    let missing = temp_out("restore_missing", "csv");
    let err = BackupLogic::restore(&store, &missing, cest()).unwrap_err();
    assert!(matches!(err, AppError::Backup(_)));

    assert_eq!(store.read_all().unwrap().filled_cells(), 1);
}

#[test]
fn test_restore_bad_header_keeps_data() {
    let (store, _) = sqlite_store("restore_bad_header");
    store
        .append_or_fill(&ColumnKey::track("sample1"), "10.06.2025 08:00:00+0200")
        .unwrap();
    let before = store.read_all().unwrap();

    let bad = temp_out("restore_bad_header", "csv");
    fs::write(&bad, "sample2_plan,,sample2_track\na,b,c\n").unwrap();

    let err = BackupLogic::restore(&store, &bad, cest()).unwrap_err();
    assert!(matches!(err, AppError::Backup(_)));
    assert_eq!(store.read_all().unwrap(), before);
}

#[test]
fn test_restore_duplicate_header_keeps_data() {
    let (store, _) = sqlite_store("restore_dup_header");
    store
        .append_or_fill(&ColumnKey::track("sample1"), "10.06.2025 08:00:00+0200")
        .unwrap();
    let before = store.read_all().unwrap();

    let bad = temp_out("restore_dup_header", "csv");
    fs::write(&bad, "sample2_plan,sample2_plan\na,b\n").unwrap();

    let err = BackupLogic::restore(&store, &bad, cest()).unwrap_err();
    assert!(matches!(err, AppError::DuplicateColumn(_)));
    assert_eq!(store.read_all().unwrap(), before);
}

#[test]
fn test_restore_anchors_cells_without_offset() {
    let (store, _) = sqlite_store("restore_naive");

    let src = temp_out("restore_naive", "csv");
    fs::write(
        &src,
        "sample3_plan,sample3_track\n10.06.2025 08:00:00,10.06.2025 08:00:30+0100\n10.06.2025 09:00:00,\n",
    )
    .unwrap();

    let (table, anchored) = BackupLogic::restore(&store, &src, cest()).unwrap();
    assert_eq!(anchored, 2);
    assert_eq!(store.read_all().unwrap().filled_cells(), 3);
    assert_eq!(
        table.column("sample3_plan").unwrap().cells,
        vec![
            Some("10.06.2025 08:00:00+0200".to_string()),
            Some("10.06.2025 09:00:00+0200".to_string()),
        ]
    );
    // an explicit offset is kept as written
    assert_eq!(
        table.column("sample3_track").unwrap().cells[0].as_deref(),
        Some("10.06.2025 08:00:30+0100")
    );
}

#[test]
fn test_read_table_csv_ragged_rows() {
    let path = temp_out("read_ragged", "csv");
    fs::write(
        &path,
        "id,sample1_plan,sample1_track\n0,10.06.2025 08:00:00+0200,\n1,10.06.2025 09:00:00+0200\n",
    )
    .unwrap();

    let table = read_table_csv(Path::new(&path)).unwrap();
    assert_eq!(table.column_names(), vec!["id", "sample1_plan", "sample1_track"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.column("sample1_track").unwrap().cells, vec![None, None]);
    assert_eq!(table.filled_cells(), 4);
}
