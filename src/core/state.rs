use crate::core::next::Countdown;
use crate::core::normalize::normalize;
use crate::db::store::EventStore;
use crate::errors::AppResult;
use crate::models::phase::Phase;
use crate::models::scan_event::ScanEvent;
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeSet;

/// Normalized view of the store owned by the front end.
///
/// It is only ever filled from `EventStore::read_all`, and callers refresh it
/// after each successful write instead of patching it in place.
#[derive(Debug, Default, Clone)]
pub struct AppState {
    events: Vec<ScanEvent>,
}

impl AppState {
    pub fn load(store: &dyn EventStore) -> AppResult<Self> {
        let mut state = Self::default();
        state.refresh(store)?;
        Ok(state)
    }

    pub fn refresh(&mut self, store: &dyn EventStore) -> AppResult<()> {
        self.events = normalize(&store.read_all()?);
        Ok(())
    }

    pub fn events(&self) -> &[ScanEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn samples_with(&self, phase: Phase) -> BTreeSet<&str> {
        self.events
            .iter()
            .filter(|e| e.phase == phase)
            .map(|e| e.sample_id.as_str())
            .collect()
    }

    /// Samples that have a plan.
    pub fn started_samples(&self) -> BTreeSet<&str> {
        self.samples_with(Phase::Planned)
    }

    pub fn tracked_samples(&self) -> BTreeSet<&str> {
        self.samples_with(Phase::Tracked)
    }

    pub fn is_started(&self, sample_id: &str) -> bool {
        self.events
            .iter()
            .any(|e| e.phase == Phase::Planned && e.sample_id == sample_id)
    }

    /// `(planned, tracked)` event counts of one sample.
    pub fn counts(&self, sample_id: &str) -> (usize, usize) {
        self.events
            .iter()
            .filter(|e| e.sample_id == sample_id)
            .fold((0, 0), |(p, t), e| match e.phase {
                Phase::Planned => (p + 1, t),
                Phase::Tracked => (p, t + 1),
            })
    }

    /// Events matching the optional sample / phase filters, in time order.
    pub fn filtered(&self, sample: Option<&str>, phase: Option<Phase>) -> Vec<&ScanEvent> {
        self.events
            .iter()
            .filter(|e| sample.is_none_or(|s| e.sample_id == s))
            .filter(|e| phase.is_none_or(|p| e.phase == p))
            .collect()
    }

    pub fn countdown(&self, now: DateTime<FixedOffset>) -> Countdown {
        Countdown::compute(&self.events, now)
    }
}
