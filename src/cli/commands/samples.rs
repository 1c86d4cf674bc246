use crate::config::Config;
use crate::core::state::AppState;
use crate::db::open_store;
use crate::errors::AppResult;
use crate::ui::messages::{header, warning};
use crate::utils::colors::{GREEN, GREY, RESET, YELLOW};
use crate::utils::table::Table;

/// Configured samples with their plan / tracking progress.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let store = open_store(cfg)?;
    let state = AppState::load(&store)?;

    header("Samples");
    let mut table = Table::new(vec!["Sample", "Profile", "Status", "Planned", "Tracked"]);

    for (id, profile) in &cfg.samples {
        let (planned, tracked) = state.counts(id);
        let status = if !state.is_started(id) {
            format!("{GREY}not started{RESET}")
        } else if tracked >= planned {
            format!("{GREEN}completed{RESET}")
        } else {
            format!("{YELLOW}running{RESET}")
        };

        table.add_row(vec![
            id.clone(),
            profile.describe(),
            status,
            planned.to_string(),
            tracked.to_string(),
        ]);
    }

    print!("{}", table.render());

    // scans of samples no longer in the config (restored or legacy data)
    let orphans: Vec<&str> = state
        .started_samples()
        .union(&state.tracked_samples())
        .copied()
        .filter(|id| !cfg.samples.contains_key(*id))
        .collect();
    if !orphans.is_empty() {
        warning(format!(
            "Scans found for unconfigured sample(s): {}",
            orphans.join(", ")
        ));
    }

    Ok(())
}
