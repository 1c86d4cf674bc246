use super::phase::Phase;
use crate::utils::time::format_timestamp;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScanEvent {
    pub sample_id: String,
    pub phase: Phase,
    pub timestamp: DateTime<FixedOffset>,
}

impl ScanEvent {
    pub fn new(sample_id: impl Into<String>, phase: Phase, timestamp: DateTime<FixedOffset>) -> Self {
        Self {
            sample_id: sample_id.into(),
            phase,
            timestamp,
        }
    }

    pub fn timestamp_str(&self) -> String {
        format_timestamp(&self.timestamp)
    }
}
