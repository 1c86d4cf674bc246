use crate::db::log::ttlog_quiet;
use crate::db::store::{EventStore, SqliteEventStore};
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::models::table::WideTable;
use crate::ui::messages::{info, success, warning};
use chrono::FixedOffset;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Snapshot the whole database into `dest_file` (optionally zipped).
    ///
    /// Uses `VACUUM INTO`, so the copy is consistent even while the WAL
    /// still holds pages that were not checkpointed.
    pub fn backup(
        store: &SqliteEventStore,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<PathBuf> {
        let dest = Path::new(dest_file);

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        ensure_writable(dest, force)?;
        if dest.exists() {
            fs::remove_file(dest)?;
        }

        let conn = &store.pool().conn;
        conn.execute("VACUUM INTO ?1", [dest.to_string_lossy().as_ref()])?;
        success(format!("Backup created: {}", dest.display()));

        let final_path = if compress {
            let compressed = compress_backup(dest)?;

            if compressed != dest {
                if let Err(e) = fs::remove_file(dest) {
                    warning(format!("Failed to remove uncompressed backup: {}", e));
                } else {
                    info(format!("Removed uncompressed backup: {}", dest.display()));
                }
            }

            compressed
        } else {
            dest.to_path_buf()
        };

        ttlog_quiet(
            conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );

        Ok(final_path)
    }

    /// Replace the whole store with the table in `src_file`. The file is fully
    /// parsed first and the replacement is a single transaction, so a bad file
    /// or a failed write leaves the current data untouched. Cells without an
    /// offset are anchored in `offset`; the second value counts them.
    pub fn restore(
        store: &dyn EventStore,
        src_file: &str,
        offset: FixedOffset,
    ) -> AppResult<(WideTable, usize)> {
        let mut table = read_table_csv(Path::new(src_file))?;
        let anchored = table.anchor_naive(offset);
        store.replace_all(&table)?;
        Ok((table, anchored))
    }
}

/// Read a wide CSV: header row = column names, empty fields = empty cells.
pub fn read_table_csv(path: &Path) -> AppResult<WideTable> {
    if !path.exists() {
        return Err(AppError::Backup(format!("File not found: {}", path.display())));
    }

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| AppError::Backup(format!("CSV open error: {e}")))?;

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| AppError::Backup(format!("CSV header error: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().any(|h| h.is_empty()) {
        return Err(AppError::Backup("CSV header contains an empty column name".into()));
    }

    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];

    for (line, record) in rdr.records().enumerate() {
        let record =
            record.map_err(|e| AppError::Backup(format!("CSV row {}: {e}", line + 2)))?;
        for (i, col) in columns.iter_mut().enumerate() {
            let cell = record
                .get(i)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from);
            col.push(cell);
        }
    }

    let mut table = WideTable::new();
    for (name, cells) in headers.into_iter().zip(columns) {
        table.push_column(name, cells);
    }
    Ok(table)
}

/// Compress a backup using .zip
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "backup.sqlite".to_string());

    let mut f = fs::File::open(path)?;
    zip.start_file(name, options)
        .map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    info(format!("📦 Compressed: {}", zip_path.display()));

    Ok(zip_path)
}
