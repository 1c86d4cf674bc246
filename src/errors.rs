//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Storage temporarily unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Column '{0}' already exists")]
    DuplicateColumn(String),

    #[error("Column '{0}' does not exist")]
    UnknownColumn(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid timestamp: {0} (expected DD.MM.YYYY HH:MM:SS)")]
    InvalidTimestamp(String),

    #[error("Invalid phase: {0}")]
    InvalidPhase(String),

    // ---------------------------
    // Scheduling errors
    // ---------------------------
    #[error("Sample '{0}' has already been initialized")]
    DuplicateInitialization(String),

    #[error("Unknown sample '{0}'")]
    UnknownSample(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export / backup errors
    // ---------------------------
    #[error("Export format not supported: {0}")]
    InvalidExportFormat(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Backup error: {0}")]
    Backup(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True for errors that go away by themselves (locked or busy storage).
    pub fn is_transient(&self) -> bool {
        match self {
            AppError::StorageUnavailable(_) => true,
            AppError::Db(e) => is_busy(e),
            _ => false,
        }
    }
}

/// SQLite reports lock contention as BUSY or LOCKED.
pub fn is_busy(e: &rusqlite::Error) -> bool {
    matches!(
        e.sqlite_error_code(),
        Some(rusqlite::ErrorCode::DatabaseBusy) | Some(rusqlite::ErrorCode::DatabaseLocked)
    )
}

pub type AppResult<T> = Result<T, AppError>;
