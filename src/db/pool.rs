//! SQLite connection wrapper (lightweight for CLI usage).

use crate::errors::{AppError, AppResult, is_busy};
use rusqlite::Connection;
use std::path::Path;
use std::thread;
use std::time::Duration;

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;
const DEFAULT_RETRIES: u32 = 3;
const BACKOFF_BASE_MS: u64 = 100;

pub struct DbPool {
    pub conn: Connection,
    retries: u32,
}

impl DbPool {
    pub fn new(path: &str) -> AppResult<Self> {
        Self::with_settings(path, DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_RETRIES)
    }

    pub fn from_config(cfg: &crate::config::Config) -> AppResult<Self> {
        Self::with_settings(&cfg.database, cfg.busy_timeout_ms, cfg.storage_retries)
    }

    pub fn with_settings(path: &str, busy_timeout_ms: u64, retries: u32) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path)).map_err(map_busy)?;
        conn.busy_timeout(Duration::from_millis(busy_timeout_ms))?;

        // WAL lets the countdown poll read while a scan is being written
        conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))
            .map_err(map_busy)?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;

        Ok(Self { conn, retries })
    }

    /// Run `func` against the connection, retrying with exponential backoff
    /// while the database is busy or locked by another writer.
    pub fn with_retry<F, T>(&self, mut func: F) -> AppResult<T>
    where
        F: FnMut(&Connection) -> AppResult<T>,
    {
        let mut attempt = 0;

        loop {
            match func(&self.conn) {
                Ok(v) => return Ok(v),
                Err(e) if e.is_transient() && attempt < self.retries => {
                    let wait = BACKOFF_BASE_MS * 2u64.pow(attempt);
                    thread::sleep(Duration::from_millis(wait));
                    attempt += 1;
                }
                Err(e) if e.is_transient() => {
                    return Err(AppError::StorageUnavailable(format!(
                        "database still locked after {} attempts ({})",
                        attempt + 1,
                        e
                    )));
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn map_busy(e: rusqlite::Error) -> AppError {
    if is_busy(&e) {
        AppError::StorageUnavailable(e.to_string())
    } else {
        AppError::Db(e)
    }
}
