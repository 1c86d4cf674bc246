//! Wide-to-long reshape of the event table.

use crate::models::column::sample_id_of;
use crate::models::phase::Phase;
use crate::models::scan_event::ScanEvent;
use crate::models::table::WideTable;
use crate::utils::time::parse_timestamp;

/// Row identity columns carried over from spreadsheet / legacy exports.
const IDENTITY_COLUMNS: [&str; 2] = ["id", "index"];

fn is_identity_column(name: &str) -> bool {
    IDENTITY_COLUMNS
        .iter()
        .any(|c| c.eq_ignore_ascii_case(name.trim()))
}

/// Flatten every timestamp cell of `table` into one event per cell, sorted by
/// time. Cells that do not parse are skipped. The sort is stable, so equal
/// timestamps keep column order, then row order.
pub fn normalize(table: &WideTable) -> Vec<ScanEvent> {
    let mut events: Vec<ScanEvent> = table
        .columns
        .iter()
        .filter(|col| !is_identity_column(&col.name))
        .flat_map(|col| {
            let phase = Phase::from_column_name(&col.name);
            let sample_id = sample_id_of(&col.name);
            col.cells
                .iter()
                .filter_map(|cell| cell.as_deref().and_then(parse_timestamp))
                .map(move |ts| ScanEvent::new(sample_id, phase, ts))
        })
        .collect();

    events.sort_by_key(|e| e.timestamp);
    events
}

/// Inverse shape: pack events back into one column per sample and phase,
/// columns in order of first appearance.
pub fn to_wide(events: &[ScanEvent]) -> WideTable {
    let mut order: Vec<String> = Vec::new();
    let mut cells: Vec<Vec<Option<String>>> = Vec::new();

    for ev in events {
        let name = format!("{}{}", ev.sample_id, ev.phase.suffix());
        let idx = match order.iter().position(|n| *n == name) {
            Some(i) => i,
            None => {
                order.push(name);
                cells.push(Vec::new());
                order.len() - 1
            }
        };
        cells[idx].push(Some(ev.timestamp_str()));
    }

    let mut table = WideTable::new();
    for (name, col) in order.into_iter().zip(cells) {
        table.push_column(name, col);
    }
    table
}
