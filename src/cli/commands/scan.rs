use crate::cli::commands::resolve_at;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::scan::ScanLogic;
use crate::db::log::ttlog_quiet;
use crate::db::open_store;
use crate::errors::AppResult;
use crate::ui::messages::{success, transient};
use crate::utils::time::format_timestamp;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Scan { sample, at } = cmd {
        let when = resolve_at(at, cfg)?;
        let store = open_store(cfg)?;

        let row = match ScanLogic::apply(&store, cfg, sample, when) {
            Ok(row) => row,
            Err(e) if e.is_transient() => {
                transient("Database is busy, the scan was not recorded. Try again.");
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        let ts = format_timestamp(&when);
        success(format!(
            "Scan of '{}' recorded at {} (slot {})",
            sample,
            ts,
            row + 1
        ));
        ttlog_quiet(
            &store.pool().conn,
            "scan",
            sample,
            &format!("Scan recorded at {} in row {}", ts, row),
        );
    }

    Ok(())
}
