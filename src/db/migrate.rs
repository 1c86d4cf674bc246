use crate::config::migrate::run_config_migration;
use crate::models::table::WideTable;
use crate::ui::messages::{info, success, warning};
use chrono::FixedOffset;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, Error, OptionalExtension, Result};
use std::fs;
use std::path::Path;

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Create the column store tables.
fn create_store_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS store_columns (
            name        TEXT PRIMARY KEY,
            position    INTEGER NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS store_cells (
            column_name TEXT NOT NULL REFERENCES store_columns(name) ON DELETE CASCADE,
            row_idx     INTEGER NOT NULL CHECK(row_idx >= 0),
            value       TEXT NOT NULL,
            PRIMARY KEY (column_name, row_idx)
        );

        CREATE TABLE IF NOT EXISTS store_meta (
            key    TEXT PRIMARY KEY,
            value  INTEGER NOT NULL
        );

        INSERT OR IGNORE INTO store_meta (key, value) VALUES ('row_count', 0);
        "#,
    )?;
    Ok(())
}

/// Read a legacy wide table (one TEXT column per sample/phase) as-is.
fn read_legacy_wide_table(conn: &Connection, table: &str) -> Result<WideTable> {
    let names: Vec<String> = {
        let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
        stmt.query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<_>>()?
    };

    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];

    let mut stmt = conn.prepare(&format!("SELECT * FROM \"{}\" ORDER BY rowid ASC", table))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        for (i, col) in columns.iter_mut().enumerate() {
            let cell = match row.get_ref(i)? {
                ValueRef::Text(t) => Some(String::from_utf8_lossy(t).to_string()),
                ValueRef::Integer(n) => Some(n.to_string()),
                _ => None,
            };
            col.push(cell);
        }
    }

    let mut wide = WideTable::new();
    for (name, cells) in names.into_iter().zip(columns) {
        wide.push_column(name, cells);
    }
    Ok(wide)
}

/// Copy the database file aside before touching legacy data.
fn backup_before_migration(db_path: &str) -> Result<()> {
    let src = Path::new(db_path);
    let backup_path = src.with_extension("pre-migration.sqlite");

    fs::copy(src, &backup_path).map_err(|e| {
        Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some(format!("Failed to create pre-migration backup: {}", e)),
        )
    })?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

/// Import the old single `plan_track` wide table into the column store and
/// keep the original as `plan_track_legacy`. The identity column is dropped
/// and cells written without an offset are anchored in `offset`.
fn migrate_legacy_plan_track(conn: &Connection, offset: FixedOffset) -> Result<()> {
    let version = "20250611_0001_import_plan_track";

    if is_applied(conn, version)? || !table_exists(conn, "plan_track")? {
        return Ok(());
    }

    warning("Legacy plan_track table detected, creating safety backup before migration...");

    let db_path: String = conn
        .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
        .unwrap_or_default();

    if !db_path.is_empty() {
        backup_before_migration(&db_path)?;
    } else {
        warning("Could not determine DB path: backup skipped.");
    }

    let mut legacy = read_legacy_wide_table(conn, "plan_track")?;
    let anchored = legacy.anchor_naive(offset);
    if anchored > 0 {
        info(format!(
            "{} legacy timestamp(s) without offset read as {}",
            anchored, offset
        ));
    }

    let tx = conn.unchecked_transaction()?;
    let mut imported = 0;
    for (position, col) in legacy
        .columns
        .iter()
        .filter(|c| !c.name.eq_ignore_ascii_case("id") && !c.name.eq_ignore_ascii_case("index"))
        .enumerate()
    {
        tx.execute(
            "INSERT OR IGNORE INTO store_columns (name, position, created_at)
             VALUES (?1, ?2, datetime('now'))",
            rusqlite::params![col.name, position as i64],
        )?;

        for (row_idx, cell) in col.cells.iter().enumerate() {
            if let Some(v) = cell {
                tx.execute(
                    "INSERT OR REPLACE INTO store_cells (column_name, row_idx, value)
                     VALUES (?1, ?2, ?3)",
                    rusqlite::params![col.name, row_idx as i64, v],
                )?;
                imported += 1;
            }
        }
    }
    tx.execute(
        "UPDATE store_meta SET value = MAX(value, ?1) WHERE key = 'row_count'",
        [legacy.row_count() as i64],
    )?;
    tx.execute_batch("ALTER TABLE plan_track RENAME TO plan_track_legacy;")?;
    tx.commit()?;

    mark_applied(conn, version, "Imported legacy plan_track table")?;
    success(format!(
        "Migration applied: {} → {} cells imported into the column store",
        version, imported
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection, offset: FixedOffset) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Column store
    let fresh = !table_exists(conn, "store_columns")?;
    create_store_tables(conn)?;
    if fresh {
        success("Created column store tables.");
    }

    // 3) Legacy wide table
    migrate_legacy_plan_track(conn, offset)?;

    // 4) Configuration file
    run_config_migration(conn)?;

    Ok(())
}
