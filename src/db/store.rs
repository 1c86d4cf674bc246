//! Column-oriented event store.
//!
//! The store keeps, per column, an ordered list of timestamp cells. Rows are
//! shared by all columns: the table is as tall as its longest column and
//! shorter columns read as empty below their last value.

use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::column::ColumnKey;
use crate::models::table::WideTable;
use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior, params};
use std::collections::BTreeSet;

pub trait EventStore {
    /// Register an empty column. Fails with `DuplicateColumn` if it exists.
    fn create_column(&self, key: &ColumnKey) -> AppResult<()>;

    /// Overwrite an existing column with `values` (row `i` gets `values[i]`),
    /// growing the table if needed.
    fn write_column(&self, key: &ColumnKey, values: &[String]) -> AppResult<()>;

    /// Fill the first empty row of the column, or append a new row when the
    /// column is full. The column is created on first use. Returns the row.
    fn append_or_fill(&self, key: &ColumnKey, value: &str) -> AppResult<usize>;

    fn read_all(&self) -> AppResult<WideTable>;

    fn drop_all(&self) -> AppResult<()>;

    /// Replace the whole content with `table`; nothing changes on failure.
    fn replace_all(&self, table: &WideTable) -> AppResult<()>;

    /// `create_column` followed by `write_column` as one step.
    fn create_column_with(&self, key: &ColumnKey, values: &[String]) -> AppResult<()> {
        self.create_column(key)?;
        self.write_column(key, values)
    }

    fn has_column(&self, key: &ColumnKey) -> AppResult<bool> {
        Ok(self.read_all()?.column(&key.column_name()).is_some())
    }
}

/// SQLite-backed store. Every operation runs in its own `BEGIN IMMEDIATE`
/// transaction, which takes the database write lock before the first read:
/// concurrent writers (threads or processes) are serialized.
pub struct SqliteEventStore {
    pool: DbPool,
}

impl SqliteEventStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    fn write_tx<F, T>(&self, mut func: F) -> AppResult<T>
    where
        F: FnMut(&Transaction) -> AppResult<T>,
    {
        self.pool.with_retry(|conn| {
            let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
            let out = func(&tx)?;
            tx.commit()?;
            Ok(out)
        })
    }
}

fn column_exists(conn: &Connection, name: &str) -> AppResult<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM store_columns WHERE name = ?1",
            [name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

fn insert_column(conn: &Connection, name: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO store_columns (name, position, created_at)
         VALUES (?1, (SELECT IFNULL(MAX(position) + 1, 0) FROM store_columns), datetime('now'))",
        [name],
    )?;
    Ok(())
}

fn row_count(conn: &Connection) -> AppResult<usize> {
    let n: i64 = conn.query_row(
        "SELECT value FROM store_meta WHERE key = 'row_count'",
        [],
        |row| row.get(0),
    )?;
    Ok(n.max(0) as usize)
}

fn set_row_count(conn: &Connection, n: usize) -> AppResult<()> {
    conn.execute(
        "INSERT INTO store_meta (key, value) VALUES ('row_count', ?1)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        [n as i64],
    )?;
    Ok(())
}

fn put_cell(conn: &Connection, name: &str, row_idx: usize, value: &str) -> AppResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO store_cells (column_name, row_idx, value) VALUES (?1, ?2, ?3)",
        params![name, row_idx as i64, value],
    )?;
    Ok(())
}

fn fill_column(conn: &Connection, name: &str, values: &[String]) -> AppResult<()> {
    conn.execute("DELETE FROM store_cells WHERE column_name = ?1", [name])?;

    for (i, v) in values.iter().enumerate() {
        if !v.trim().is_empty() {
            put_cell(conn, name, i, v)?;
        }
    }

    let rows = row_count(conn)?;
    if values.len() > rows {
        set_row_count(conn, values.len())?;
    }
    Ok(())
}

fn clear_all(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        "DELETE FROM store_cells;
         DELETE FROM store_columns;",
    )?;
    set_row_count(conn, 0)
}

impl EventStore for SqliteEventStore {
    fn create_column(&self, key: &ColumnKey) -> AppResult<()> {
        let name = key.column_name();
        self.write_tx(|tx| {
            if column_exists(tx, &name)? {
                return Err(AppError::DuplicateColumn(name.clone()));
            }
            insert_column(tx, &name)
        })
    }

    fn write_column(&self, key: &ColumnKey, values: &[String]) -> AppResult<()> {
        let name = key.column_name();
        self.write_tx(|tx| {
            if !column_exists(tx, &name)? {
                return Err(AppError::UnknownColumn(name.clone()));
            }
            fill_column(tx, &name, values)
        })
    }

    fn create_column_with(&self, key: &ColumnKey, values: &[String]) -> AppResult<()> {
        let name = key.column_name();
        self.write_tx(|tx| {
            if column_exists(tx, &name)? {
                return Err(AppError::DuplicateColumn(name.clone()));
            }
            insert_column(tx, &name)?;
            fill_column(tx, &name, values)
        })
    }

    fn append_or_fill(&self, key: &ColumnKey, value: &str) -> AppResult<usize> {
        let name = key.column_name();
        self.write_tx(|tx| {
            if !column_exists(tx, &name)? {
                insert_column(tx, &name)?;
            }

            let rows = row_count(tx)?;
            let used: BTreeSet<usize> = {
                let mut stmt = tx.prepare_cached(
                    "SELECT row_idx FROM store_cells WHERE column_name = ?1 ORDER BY row_idx",
                )?;
                stmt.query_map([&name], |row| row.get::<_, i64>(0))?
                    .map(|r| r.map(|v| v as usize))
                    .collect::<rusqlite::Result<_>>()?
            };

            let target = (0..rows).find(|r| !used.contains(r)).unwrap_or(rows);
            if target >= rows {
                set_row_count(tx, target + 1)?;
            }

            put_cell(tx, &name, target, value)?;
            Ok(target)
        })
    }

    fn read_all(&self) -> AppResult<WideTable> {
        self.pool.with_retry(|conn| {
            // One read transaction for a consistent snapshot
            let tx = Transaction::new_unchecked(conn, TransactionBehavior::Deferred)?;
            let rows = row_count(&tx)?;

            let names: Vec<String> = {
                let mut stmt =
                    tx.prepare_cached("SELECT name FROM store_columns ORDER BY position ASC")?;
                stmt.query_map([], |row| row.get(0))?
                    .collect::<rusqlite::Result<_>>()?
            };

            let mut table = WideTable::new();
            for name in names {
                let mut cells: Vec<Option<String>> = vec![None; rows];
                let mut stmt = tx.prepare_cached(
                    "SELECT row_idx, value FROM store_cells WHERE column_name = ?1",
                )?;
                let found = stmt.query_map([&name], |row| {
                    Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
                })?;
                for r in found {
                    let (idx, value) = r?;
                    let idx = idx as usize;
                    if idx >= cells.len() {
                        cells.resize(idx + 1, None);
                    }
                    cells[idx] = Some(value);
                }
                table.push_column(name, cells);
            }

            tx.commit()?;
            Ok(table)
        })
    }

    fn drop_all(&self) -> AppResult<()> {
        self.write_tx(|tx| clear_all(tx))
    }

    fn replace_all(&self, table: &WideTable) -> AppResult<()> {
        self.write_tx(|tx| {
            clear_all(tx)?;

            for col in &table.columns {
                if column_exists(tx, &col.name)? {
                    return Err(AppError::DuplicateColumn(col.name.clone()));
                }
                insert_column(tx, &col.name)?;
                for (i, cell) in col.cells.iter().enumerate() {
                    if let Some(v) = cell {
                        put_cell(tx, &col.name, i, v)?;
                    }
                }
            }

            set_row_count(tx, table.row_count())
        })
    }

    fn has_column(&self, key: &ColumnKey) -> AppResult<bool> {
        let name = key.column_name();
        self.pool.with_retry(|conn| column_exists(conn, &name))
    }
}
