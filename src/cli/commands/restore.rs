use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::db::log::ttlog_quiet;
use crate::db::open_store;
use crate::errors::AppResult;
use crate::export::fs_utils::confirm;
use crate::ui::messages::{info, success, transient};
use crate::utils::path::absolute;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Restore { file, yes } = cmd {
        let src = absolute(file);

        if !*yes && !confirm(&format!("All scans will be replaced with '{}'.", src)) {
            info("Restore cancelled.");
            return Ok(());
        }

        let offset = cfg.offset()?;
        let store = open_store(cfg)?;
        let (table, anchored) = match BackupLogic::restore(&store, &src, offset) {
            Ok(r) => r,
            Err(e) if e.is_transient() => {
                transient("Database is busy, nothing was restored. Try again.");
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        success(format!(
            "Restored {} column(s), {} row(s) from {}",
            table.columns.len(),
            table.row_count(),
            src
        ));
        if anchored > 0 {
            info(format!(
                "{} timestamp(s) without offset read as {}",
                anchored, offset
            ));
        }
        ttlog_quiet(
            &store.pool().conn,
            "restore",
            &src,
            &format!("{} cells restored", table.filled_cells()),
        );
    }

    Ok(())
}
