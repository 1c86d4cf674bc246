use crate::cli::commands::parse_source;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::db::open_store;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::utils::path::absolute;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        wide,
        sample,
        source,
        force,
    } = cmd
    {
        let phase = parse_source(source)?;
        let store = open_store(cfg)?;
        let dest = absolute(file);
        ExportLogic::export(
            &store,
            *format,
            &dest,
            *wide,
            sample.as_deref(),
            phase,
            *force,
        )?;
        ttlog_quiet(
            &store.pool().conn,
            "export",
            &dest,
            &format!("{} export (wide: {})", format.as_str(), wide),
        );
    }
    Ok(())
}
