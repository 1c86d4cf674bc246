use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::start::StartLogic;
use crate::db::log::ttlog_quiet;
use crate::db::open_store;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, transient, warning};
use crate::utils::time::{format_timestamp, now_in};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Start { sample } = cmd {
        // plans always start at the moment of initialization
        let start = now_in(cfg.offset()?);
        let store = open_store(cfg)?;

        match StartLogic::apply(&store, cfg, sample, start) {
            Ok(plan) => {
                success(format!(
                    "Sample '{}' started: {} scans planned",
                    sample,
                    plan.len()
                ));
                if let (Some(first), Some(last)) = (plan.first(), plan.last()) {
                    info(format!(
                        "First scan {} · last scan {}",
                        format_timestamp(first),
                        format_timestamp(last)
                    ));
                }
                ttlog_quiet(
                    &store.pool().conn,
                    "start",
                    sample,
                    &format!("{} scans planned from {}", plan.len(), format_timestamp(&start)),
                );
                Ok(())
            }
            Err(AppError::DuplicateInitialization(id)) => {
                warning(format!("Sample '{}' has already been initialized.", id));
                Ok(())
            }
            Err(e) if e.is_transient() => {
                transient("Database is busy, the sample was not started. Try again.");
                Err(e)
            }
            Err(e) => Err(e),
        }
    } else {
        Ok(())
    }
}
