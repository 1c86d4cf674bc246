use crate::config::Config;
use crate::db::store::EventStore;
use crate::errors::AppResult;
use crate::models::column::ColumnKey;
use crate::utils::time::format_timestamp;
use chrono::{DateTime, FixedOffset};

/// Business logic for the `scan` command: confirm that a scan happened.
pub struct ScanLogic;

impl ScanLogic {
    /// Record a tracked scan of `sample_id` at `at`. The timestamp lands in
    /// the first empty slot of the sample's `_track` column; the returned
    /// value is that row.
    ///
    /// Slots are not matched against the plan: a late scan simply takes the
    /// next free row.
    pub fn apply(
        store: &dyn EventStore,
        cfg: &Config,
        sample_id: &str,
        at: DateTime<FixedOffset>,
    ) -> AppResult<usize> {
        cfg.sample(sample_id)?;
        store.append_or_fill(&ColumnKey::track(sample_id), &format_timestamp(&at))
    }
}
