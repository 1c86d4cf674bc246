pub mod backup;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod log;
pub mod next;
pub mod restore;
pub mod samples;
pub mod scan;
pub mod start;
pub mod timeline;
pub mod wipe;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::phase::Phase;
use crate::utils::time::{now_in, parse_input_timestamp};
use chrono::{DateTime, FixedOffset};

/// `--at` value in the configured offset, or now.
pub(crate) fn resolve_at(at: &Option<String>, cfg: &Config) -> AppResult<DateTime<FixedOffset>> {
    let offset = cfg.offset()?;
    match at {
        Some(s) => parse_input_timestamp(s, offset),
        None => Ok(now_in(offset)),
    }
}

/// `--source` value.
pub(crate) fn parse_source(source: &Option<String>) -> AppResult<Option<Phase>> {
    source
        .as_deref()
        .map(|s| Phase::from_input(s).ok_or_else(|| AppError::InvalidPhase(s.to_string())))
        .transpose()
}
