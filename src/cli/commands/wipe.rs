use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::db::open_store;
use crate::db::store::EventStore;
use crate::errors::AppResult;
use crate::export::fs_utils::confirm;
use crate::ui::messages::{info, success, transient};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Wipe { yes } = cmd {
        if !*yes && !confirm("Every planned and tracked scan will be deleted.") {
            info("Wipe cancelled.");
            return Ok(());
        }

        let store = open_store(cfg)?;
        match store.drop_all() {
            Ok(()) => {}
            Err(e) if e.is_transient() => {
                transient("Database is busy, nothing was deleted. Try again.");
                return Err(e);
            }
            Err(e) => return Err(e),
        }

        success("All scans deleted.");
        ttlog_quiet(&store.pool().conn, "wipe", "store", "All columns dropped");
    }

    Ok(())
}
