use ctscan_tracker::core::state::AppState;
use ctscan_tracker::db::initialize::init_db;
use ctscan_tracker::db::pool::DbPool;
use ctscan_tracker::db::store::{EventStore, SqliteEventStore};
use ctscan_tracker::models::column::ColumnKey;
use rusqlite::Connection;
use std::path::Path;

mod common;
use common::{cest, setup_test_db};

fn table_exists(conn: &Connection, name: &str) -> bool {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            [name],
            |row| row.get(0),
        )
        .unwrap();
    count > 0
}

#[test]
fn test_fresh_database_gets_store_tables() {
    let db_path = setup_test_db("migrate_fresh");
    let pool = DbPool::new(&db_path).unwrap();
    init_db(&pool.conn, cest()).unwrap();

    for t in ["log", "store_columns", "store_cells", "store_meta"] {
        assert!(table_exists(&pool.conn, t), "missing table {t}");
    }

    // running again is a no-op
    init_db(&pool.conn, cest()).unwrap();
    let store = SqliteEventStore::new(pool);
    assert!(store.read_all().unwrap().is_empty());
}

#[test]
fn test_legacy_plan_track_table_is_imported() {
    let db_path = setup_test_db("migrate_legacy");
    let backup = Path::new(&db_path).with_extension("pre-migration.sqlite");
    std::fs::remove_file(&backup).ok();

    {
        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE plan_track (
                "index"        INTEGER,
                sample1_plan   TEXT,
                sample1_track  TEXT,
                sample2_plan   TEXT
            );
            INSERT INTO plan_track VALUES (0, '10.06.2025 08:00:00+0200', '10.06.2025 08:01:00+0200', '10.06.2025 08:30:00+0200');
            INSERT INTO plan_track VALUES (1, '10.06.2025 09:00:00+0200', NULL, 'garbage');
            INSERT INTO plan_track VALUES (2, '10.06.2025 10:00:00+0200', NULL, NULL);
            "#,
        )
        .unwrap();
    }

    let pool = DbPool::new(&db_path).unwrap();
    init_db(&pool.conn, cest()).unwrap();

    assert!(backup.exists());
    assert!(!table_exists(&pool.conn, "plan_track"));
    assert!(table_exists(&pool.conn, "plan_track_legacy"));

    let store = SqliteEventStore::new(pool);
    let table = store.read_all().unwrap();
    assert_eq!(
        table.column_names(),
        vec!["sample1_plan", "sample1_track", "sample2_plan"]
    );
    assert_eq!(table.row_count(), 3);

    // the unparseable legacy cell is kept but ignored
    let state = AppState::load(&store).unwrap();
    assert_eq!(state.counts("sample1"), (3, 1));
    assert_eq!(state.counts("sample2"), (1, 0));

    // new scans fill the legacy gaps
    assert_eq!(
        store
            .append_or_fill(&ColumnKey::track("sample1"), "10.06.2025 09:01:00+0200")
            .unwrap(),
        1
    );
}

#[test]
fn test_legacy_cells_without_offset_are_anchored() {
    let db_path = setup_test_db("migrate_legacy_naive");
    std::fs::remove_file(Path::new(&db_path).with_extension("pre-migration.sqlite")).ok();

    {
        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE plan_track (
                "index"        INTEGER,
                sample1_plan   TEXT,
                sample1_track  TEXT
            );
            INSERT INTO plan_track VALUES (0, '10.06.2025 08:00:00', '10.06.2025 08:01:00');
            INSERT INTO plan_track VALUES (1, '10.06.2025 09:00:00', NULL);
            "#,
        )
        .unwrap();
    }

    let pool = DbPool::new(&db_path).unwrap();
    init_db(&pool.conn, cest()).unwrap();

    let store = SqliteEventStore::new(pool);
    let table = store.read_all().unwrap();
    assert_eq!(
        table.column("sample1_plan").unwrap().cells,
        vec![
            Some("10.06.2025 08:00:00+0200".to_string()),
            Some("10.06.2025 09:00:00+0200".to_string()),
        ]
    );

    // the imported history is visible, not dropped as unreadable
    let state = AppState::load(&store).unwrap();
    assert_eq!(state.counts("sample1"), (2, 1));
}
