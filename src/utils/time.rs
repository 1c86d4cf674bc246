//! Time utilities: the storage timestamp format, UTC offsets and countdowns.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDateTime, Offset, TimeZone, Utc};

/// Storage format shared by every reader and writer, e.g. `10.06.2025 08:03:00+0200`.
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S%z";

/// Operator input format for retroactive scans (offset taken from config).
pub const INPUT_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

pub fn format_timestamp(ts: &DateTime<FixedOffset>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored cell. Anything that does not match exactly (including
/// timestamps without an offset) is `None`.
pub fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT).ok()
}

/// Parse operator input: the full storage format, or the same without an
/// offset, interpreted in `offset`.
pub fn parse_input_timestamp(s: &str, offset: FixedOffset) -> AppResult<DateTime<FixedOffset>> {
    if let Some(ts) = parse_timestamp(s) {
        return Ok(ts);
    }

    let naive = NaiveDateTime::parse_from_str(s.trim(), INPUT_FORMAT)
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))?;

    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| AppError::InvalidTimestamp(s.to_string()))
}

/// Storage form of a cell written without an offset, read in `offset`.
/// `None` for cells that already carry one or are not timestamps at all.
pub fn anchor_naive_cell(s: &str, offset: FixedOffset) -> Option<String> {
    if parse_timestamp(s).is_some() {
        return None;
    }
    let naive = NaiveDateTime::parse_from_str(s.trim(), INPUT_FORMAT).ok()?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|ts| format_timestamp(&ts))
}

/// Parse a `+HH:MM` / `-HH:MM` / `local` offset setting.
pub fn parse_offset(s: &str) -> AppResult<FixedOffset> {
    let t = s.trim();

    if t.eq_ignore_ascii_case("local") {
        return Ok(*Local::now().offset());
    }
    if t.eq_ignore_ascii_case("utc") || t == "Z" {
        return Ok(Utc.fix());
    }

    let (sign, rest) = match t.chars().next() {
        Some('+') => (1, &t[1..]),
        Some('-') => (-1, &t[1..]),
        _ => return Err(AppError::Config(format!("Invalid UTC offset '{}'", s))),
    };

    let invalid = || AppError::Config(format!("Invalid UTC offset '{}'", s));

    let (h, m) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => (
            rest.get(..2).ok_or_else(invalid)?,
            rest.get(2..).ok_or_else(invalid)?,
        ),
        None => (rest, "0"),
    };

    let hours: i32 = h.parse().map_err(|_| invalid())?;
    let minutes: i32 = m.parse().map_err(|_| invalid())?;

    let seconds = hours
        .checked_mul(3600)
        .and_then(|hs| minutes.checked_mul(60).and_then(|ms| hs.checked_add(ms)))
        .and_then(|total| total.checked_mul(sign))
        .ok_or_else(|| AppError::Config(format!("UTC offset out of range '{}'", s)))?;

    FixedOffset::east_opt(seconds)
        .ok_or_else(|| AppError::Config(format!("UTC offset out of range '{}'", s)))
}

/// Current wall-clock instant expressed in `offset`.
pub fn now_in(offset: FixedOffset) -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&offset)
}

/// `MM:SS` where minutes keep counting past 59 (e.g. `75:02`).
pub fn format_countdown(remaining: Duration) -> String {
    let total = remaining.num_seconds().max(0);
    let (mins, secs) = (total / 60, total % 60);
    format!("{:02}:{:02}", mins, secs)
}
