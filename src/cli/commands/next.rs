use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::countdown::{CountdownLogic, print_frame};
use crate::db::open_store;
use crate::errors::AppResult;
use crate::utils::time::now_in;
use std::time::Duration;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Next { watch, ticks } = cmd {
        let offset = cfg.offset()?;
        let store = open_store(cfg)?;

        if *watch {
            let refresh = Duration::from_secs(cfg.countdown_refresh_secs.max(1));
            CountdownLogic::watch(&store, offset, refresh, *ticks)?;
        } else {
            let now = now_in(offset);
            print_frame(&CountdownLogic::tick(&store, now), now);
        }
    }

    Ok(())
}
