// src/export/excel_date.rs

use crate::utils::time::parse_timestamp;
use chrono::{NaiveDate, NaiveDateTime};

/// Excel number format used for scan timestamps.
pub(crate) const TIMESTAMP_NUM_FORMAT: &str = "dd.mm.yyyy hh:mm:ss";

/// Interpret a stored timestamp cell as an Excel serial in its own wall-clock
/// time (Excel has no notion of offsets).
pub(crate) fn parse_to_excel_date(s: &str) -> Option<f64> {
    parse_timestamp(s).map(|ts| naive_datetime_to_excel_serial(&ts.naive_local()))
}

fn naive_datetime_to_excel_serial(dt: &NaiveDateTime) -> f64 {
    let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();

    let duration = *dt - excel_epoch;

    let days = duration.num_days() as f64;
    let secs = (duration.num_seconds() - duration.num_days() * 86400) as f64;

    days + secs / 86400.0
}
