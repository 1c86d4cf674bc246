// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{EventExport, Sheet};
use crate::export::notify_export_success;
use crate::models::table::WideTable;
use crate::ui::messages::info;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

fn write_json_file(value: &impl serde::Serialize, path: &Path) -> AppResult<()> {
    let json_data = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::from(io::Error::other(format!("JSON serialization error: {e}"))))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;
    Ok(())
}

/// Long layout: one JSON object per scan.
pub(crate) fn export_json(events: &[EventExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));
    write_json_file(&events, path)?;
    notify_export_success("JSON", path);
    Ok(())
}

/// Wide layout: `{ "sample1_plan": ["…", null, …], … }`, column order kept.
pub(crate) fn export_wide_json(table: &WideTable, path: &Path) -> AppResult<()> {
    info(format!("Exporting table to JSON: {}", path.display()));

    let mut obj = Map::new();
    for col in &table.columns {
        let cells = col
            .cells
            .iter()
            .map(|c| c.clone().map(Value::String).unwrap_or(Value::Null))
            .collect();
        obj.insert(col.name.clone(), Value::Array(cells));
    }

    write_json_file(&Value::Object(obj), path)?;
    notify_export_success("JSON", path);
    Ok(())
}

/// CSV with header row; empty cells stay empty.
pub(crate) fn export_csv(sheet: &Sheet, path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::from(io::Error::other(format!("CSV open error: {e}"))))?;

    wtr.write_record(&sheet.headers)
        .map_err(|e| AppError::from(io::Error::other(format!("CSV write error: {e}"))))?;

    for row in &sheet.rows {
        wtr.write_record(row)
            .map_err(|e| AppError::from(io::Error::other(format!("CSV write error: {e}"))))?;
    }

    wtr.flush()
        .map_err(|e| AppError::from(io::Error::other(format!("CSV flush error: {e}"))))?;

    notify_export_success("CSV", path);
    Ok(())
}
