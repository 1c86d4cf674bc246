use ctscan_tracker::db::memory::MemoryEventStore;
use ctscan_tracker::db::pool::DbPool;
use ctscan_tracker::db::store::{EventStore, SqliteEventStore};
use ctscan_tracker::errors::AppError;
use ctscan_tracker::models::column::ColumnKey;
use ctscan_tracker::models::table::WideTable;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

mod common;
use common::sqlite_store;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Same checks against both implementations.
fn with_stores(name: &str, check: impl Fn(&dyn EventStore)) {
    let mem = MemoryEventStore::new();
    check(&mem);

    let (sqlite, _) = sqlite_store(name);
    check(&sqlite);
}

#[test]
fn test_fill_uses_first_empty_row_not_row_count() {
    with_stores("store_first_empty", |store| {
        store
            .create_column_with(&ColumnKey::plan("sample1"), &strings(&["a", "b", "c"]))
            .unwrap();
        store.create_column(&ColumnKey::track("sample1")).unwrap();

        let row = store.append_or_fill(&ColumnKey::track("sample1"), "t1").unwrap();
        assert_eq!(row, 0);

        let table = store.read_all().unwrap();
        assert_eq!(table.row_count(), 3);
        let track = table.column("sample1_track").unwrap();
        assert_eq!(track.cells, vec![Some("t1".to_string()), None, None]);
    });
}

#[test]
fn test_fill_appends_when_column_is_full() {
    with_stores("store_append", |store| {
        let key = ColumnKey::track("sample2");
        for expected in 0..3 {
            assert_eq!(store.append_or_fill(&key, "x").unwrap(), expected);
        }

        let table = store.read_all().unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.filled_cells(), 3);
    });
}

#[test]
fn test_fill_creates_missing_column() {
    with_stores("store_autocreate", |store| {
        assert!(!store.has_column(&ColumnKey::track("sample9")).unwrap());
        store.append_or_fill(&ColumnKey::track("sample9"), "x").unwrap();
        assert!(store.has_column(&ColumnKey::track("sample9")).unwrap());
    });
}

#[test]
fn test_fill_reuses_gap_between_values() {
    with_stores("store_gap", |store| {
        let key = ColumnKey::track("sample1");
        store.create_column(&key).unwrap();
        store.write_column(&key, &strings(&["a", "", "c"])).unwrap();

        assert_eq!(store.append_or_fill(&key, "b").unwrap(), 1);
        assert_eq!(store.append_or_fill(&key, "d").unwrap(), 3);
    });
}

#[test]
fn test_duplicate_column_is_rejected() {
    with_stores("store_duplicate", |store| {
        let key = ColumnKey::plan("sample1");
        store.create_column(&key).unwrap();

        let err = store.create_column(&key).unwrap_err();
        assert!(matches!(err, AppError::DuplicateColumn(name) if name == "sample1_plan"));

        let err = store.create_column_with(&key, &strings(&["a"])).unwrap_err();
        assert!(matches!(err, AppError::DuplicateColumn(_)));
    });
}

#[test]
fn test_write_to_unknown_column_fails() {
    with_stores("store_unknown", |store| {
        let err = store
            .write_column(&ColumnKey::plan("nope"), &strings(&["a"]))
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownColumn(_)));
    });
}

#[test]
fn test_shorter_columns_are_padded() {
    with_stores("store_padding", |store| {
        store
            .create_column_with(&ColumnKey::plan("sample1"), &strings(&["a"]))
            .unwrap();
        store
            .create_column_with(&ColumnKey::plan("sample2"), &strings(&["a", "b", "c", "d"]))
            .unwrap();

        let table = store.read_all().unwrap();
        assert_eq!(table.column_names(), vec!["sample1_plan", "sample2_plan"]);
        assert!(table.columns.iter().all(|c| c.cells.len() == 4));
        assert_eq!(table.column("sample1_plan").unwrap().cells[3], None);
    });
}

#[test]
fn test_drop_all_empties_store() {
    with_stores("store_drop", |store| {
        store.append_or_fill(&ColumnKey::track("sample1"), "x").unwrap();
        store.drop_all().unwrap();

        let table = store.read_all().unwrap();
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);

        // usable again afterwards
        assert_eq!(store.append_or_fill(&ColumnKey::track("sample1"), "y").unwrap(), 0);
    });
}

#[test]
fn test_replace_all_swaps_content() {
    with_stores("store_replace", |store| {
        store.append_or_fill(&ColumnKey::track("old"), "x").unwrap();

        let mut table = WideTable::new();
        table.push_column("sample1_plan", vec![Some("a".into()), Some("b".into())]);
        table.push_column("sample1_track", vec![None, Some("c".into())]);
        store.replace_all(&table).unwrap();

        assert_eq!(store.read_all().unwrap(), table);
    });
}

#[test]
fn test_replace_all_is_all_or_nothing() {
    with_stores("store_replace_atomic", |store| {
        store
            .create_column_with(&ColumnKey::plan("sample1"), &strings(&["keep"]))
            .unwrap();
        let before = store.read_all().unwrap();

        // duplicate header: the second column fails after the first was written
        let mut bad = WideTable::new();
        bad.push_column("sample5_plan", vec![Some("a".into())]);
        bad.push_column("sample5_plan", vec![Some("b".into())]);

        let err = store.replace_all(&bad).unwrap_err();
        assert!(matches!(err, AppError::DuplicateColumn(_)));
        assert_eq!(store.read_all().unwrap(), before);
    });
}

#[test]
fn test_concurrent_fill_memory_loses_nothing() {
    let store = Arc::new(MemoryEventStore::new());
    let key = ColumnKey::track("sample1");

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            let key = key.clone();
            thread::spawn(move || {
                (0..25)
                    .map(|i| store.append_or_fill(&key, &format!("{t}-{i}")).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let rows: BTreeSet<usize> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();

    assert_eq!(rows, (0..200).collect());
    assert_eq!(store.read_all().unwrap().filled_cells(), 200);
}

#[test]
fn test_concurrent_fill_sqlite_loses_nothing() {
    let (_, db_path) = sqlite_store("store_concurrent");
    let key = ColumnKey::track("sample1");

    // one connection per writer, like separate processes
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let db_path = db_path.clone();
            let key = key.clone();
            thread::spawn(move || {
                let pool = DbPool::with_settings(&db_path, 10_000, 8).unwrap();
                let store = SqliteEventStore::new(pool);
                (0..10)
                    .map(|i| store.append_or_fill(&key, &format!("{t}-{i}")).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let rows: BTreeSet<usize> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();

    assert_eq!(rows, (0..40).collect());

    let store = SqliteEventStore::new(DbPool::new(&db_path).unwrap());
    let table = store.read_all().unwrap();
    assert_eq!(table.row_count(), 40);
    assert_eq!(table.filled_cells(), 40);
}

#[test]
fn test_locked_database_reports_storage_unavailable() {
    let (store, db_path) = sqlite_store("store_locked");
    store
        .append_or_fill(&ColumnKey::track("sample1"), "10.06.2025 08:00:00+0200")
        .unwrap();

    // another process holds the write lock
    let holder = rusqlite::Connection::open(&db_path).unwrap();
    holder.execute_batch("BEGIN IMMEDIATE;").unwrap();

    let impatient = SqliteEventStore::new(DbPool::with_settings(&db_path, 20, 1).unwrap());
    let err = impatient.drop_all().unwrap_err();
    assert!(err.is_transient());
    assert!(matches!(err, AppError::StorageUnavailable(_)));

    holder.execute_batch("ROLLBACK;").unwrap();
    assert_eq!(store.read_all().unwrap().filled_cells(), 1);
}
