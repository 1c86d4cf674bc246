// src/export/logic.rs

use crate::core::state::AppState;
use crate::db::store::EventStore;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json, export_wide_json};
use crate::export::model::{EventExport, Sheet};
use crate::export::xlsx::export_xlsx;
use crate::models::phase::Phase;
use crate::ui::messages::warning;
use std::io;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the scans.
    ///
    /// - `wide = false`: the normalized timeline, one row per scan, filtered
    ///   by `sample` / `phase`
    /// - `wide = true`: the raw table, one column per sample and phase
    ///   (the layout `restore` reads back)
    pub fn export(
        store: &dyn EventStore,
        format: ExportFormat,
        file: &str,
        wide: bool,
        sample: Option<&str>,
        phase: Option<Phase>,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::from(io::Error::other(format!(
                "Output file path must be absolute: {file}"
            ))));
        }

        ensure_writable(path, force)?;

        if wide {
            let table = store.read_all()?;
            if table.is_empty() {
                warning("Event table is empty. Nothing to export.");
                return Ok(());
            }

            return match format {
                ExportFormat::Csv => export_csv(&Sheet::from_wide(&table), path),
                ExportFormat::Json => export_wide_json(&table, path),
                ExportFormat::Xlsx => export_xlsx(&Sheet::from_wide(&table), "table", path),
            };
        }

        let state = AppState::load(store)?;
        let events: Vec<EventExport> = state
            .filtered(sample, phase)
            .into_iter()
            .map(EventExport::from)
            .collect();

        if events.is_empty() {
            warning("No scans found for the selected filter. Nothing to export.");
            return Ok(());
        }

        match format {
            ExportFormat::Csv => export_csv(&Sheet::from_events(&events), path)?,
            ExportFormat::Json => export_json(&events, path)?,
            ExportFormat::Xlsx => export_xlsx(&Sheet::from_events(&events), "timeline", path)?,
        }

        Ok(())
    }
}
