use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::db::open_store;
use crate::errors::AppResult;
use crate::utils::path::absolute;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        let store = open_store(cfg)?;
        BackupLogic::backup(&store, &absolute(file), *compress, *force)?;
    }

    Ok(())
}
