use crate::config::Config;
use crate::core::schedule::generate;
use crate::db::store::EventStore;
use crate::errors::{AppError, AppResult};
use crate::models::column::ColumnKey;
use crate::utils::time::format_timestamp;
use chrono::{DateTime, FixedOffset};

/// Business logic for the `start` command: plan a sample's scans.
pub struct StartLogic;

impl StartLogic {
    /// Generate the plan of `sample_id` from `start` and store it as a new
    /// `_plan` column. A sample can be started only once.
    pub fn apply(
        store: &dyn EventStore,
        cfg: &Config,
        sample_id: &str,
        start: DateTime<FixedOffset>,
    ) -> AppResult<Vec<DateTime<FixedOffset>>> {
        let profile = cfg.sample(sample_id)?;

        let plan = generate(profile, start, cfg.initial_interval_minutes);
        let cells: Vec<String> = plan.iter().map(format_timestamp).collect();

        let key = ColumnKey::plan(sample_id);
        match store.create_column_with(&key, &cells) {
            Ok(()) => Ok(plan),
            Err(AppError::DuplicateColumn(_)) => {
                Err(AppError::DuplicateInitialization(sample_id.to_string()))
            }
            Err(e) => Err(e),
        }
    }
}
