// src/export/model.rs

use crate::models::scan_event::ScanEvent;
use crate::models::table::WideTable;
use serde::Serialize;

/// Flat record of one scan for export.
#[derive(Serialize, Clone, Debug)]
pub struct EventExport {
    pub sample: String,
    pub source: String,
    pub timestamp: String,
}

impl From<&ScanEvent> for EventExport {
    fn from(ev: &ScanEvent) -> Self {
        Self {
            sample: ev.sample_id.clone(),
            source: ev.phase.as_str().to_string(),
            timestamp: ev.timestamp_str(),
        }
    }
}

/// Header for the long layout.
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec!["sample", "source", "timestamp"]
}

pub(crate) fn event_to_row(e: &EventExport) -> Vec<String> {
    vec![e.sample.clone(), e.source.clone(), e.timestamp.clone()]
}

/// Header + string rows, shared by the CSV and XLSX writers.
#[derive(Debug, Clone, Default)]
pub(crate) struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn from_events(events: &[EventExport]) -> Self {
        Self {
            headers: get_headers().into_iter().map(String::from).collect(),
            rows: events.iter().map(event_to_row).collect(),
        }
    }

    pub fn from_wide(table: &WideTable) -> Self {
        Self {
            headers: table.column_names().into_iter().map(String::from).collect(),
            rows: table.rows(),
        }
    }
}
