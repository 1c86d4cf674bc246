use crate::cli::commands::parse_source;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::state::AppState;
use crate::db::open_store;
use crate::errors::AppResult;
use crate::ui::messages::{header, warning};
use crate::utils::colors::colorize_event;
use crate::utils::table::Table;
use crate::utils::time::{format_timestamp, now_in};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Timeline { sample, source } = cmd {
        let phase = parse_source(source)?;
        if let Some(id) = sample {
            cfg.sample(id)?;
        }

        let store = open_store(cfg)?;
        let state = AppState::load(&store)?;
        let events = state.filtered(sample.as_deref(), phase);

        if events.is_empty() {
            warning("No scans found.");
            return Ok(());
        }

        let now = now_in(cfg.offset()?);

        header("Scan timeline");
        let mut table = Table::new(vec!["#", "Sample", "Source", "Timestamp"]);
        for (i, ev) in events.iter().enumerate() {
            let is_past = ev.timestamp <= now;
            table.add_row(vec![
                (i + 1).to_string(),
                ev.sample_id.clone(),
                colorize_event(ev.phase.as_str(), ev.phase, is_past),
                colorize_event(&format_timestamp(&ev.timestamp), ev.phase, is_past),
            ]);
        }
        print!("{}", table.render());
        println!("{} scan(s)", events.len());
    }

    Ok(())
}
