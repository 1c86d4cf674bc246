use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use chrono::FixedOffset;
use rusqlite::Connection;

/// Initialize the database.
/// Delegates all schema creation / upgrades to the migration engine.
/// `offset` anchors legacy timestamps that were stored without one.
pub fn init_db(conn: &Connection, offset: FixedOffset) -> AppResult<()> {
    run_pending_migrations(conn, offset).map_err(|e| AppError::Migration(e.to_string()))?;
    Ok(())
}
