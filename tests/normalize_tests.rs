use ctscan_tracker::core::normalize::{normalize, to_wide};
use ctscan_tracker::models::phase::Phase;
use ctscan_tracker::models::table::WideTable;

mod common;
use common::at;

fn cells(values: &[&str]) -> Vec<Option<String>> {
    values
        .iter()
        .map(|v| {
            if v.is_empty() {
                None
            } else {
                Some(v.to_string())
            }
        })
        .collect()
}

#[test]
fn test_plan_and_track_columns_become_sorted_events() {
    let mut table = WideTable::new();
    // tracked column first: order must come from the timestamps
    table.push_column("sample1_track", cells(&["10.06.2025 08:04:00+0200"]));
    table.push_column(
        "sample1_plan",
        cells(&["10.06.2025 08:00:00+0200", "10.06.2025 08:03:00+0200"]),
    );

    let events = normalize(&table);

    let got: Vec<(&str, Phase, _)> = events
        .iter()
        .map(|e| (e.sample_id.as_str(), e.phase, e.timestamp))
        .collect();
    assert_eq!(
        got,
        vec![
            ("sample1", Phase::Planned, at(2025, 6, 10, 8, 0)),
            ("sample1", Phase::Planned, at(2025, 6, 10, 8, 3)),
            ("sample1", Phase::Tracked, at(2025, 6, 10, 8, 4)),
        ]
    );
}

#[test]
fn test_empty_table_gives_no_events() {
    assert!(normalize(&WideTable::new()).is_empty());

    let mut table = WideTable::new();
    table.push_column("sample1_plan", cells(&["", ""]));
    assert!(normalize(&table).is_empty());
}

#[test]
fn test_unparseable_and_naive_cells_are_skipped() {
    let mut table = WideTable::new();
    table.push_column(
        "sample2_plan",
        cells(&[
            "not a date",
            "10.06.2025 08:00:00",
            "2025-06-10T08:00:00+02:00",
            "10.06.2025 09:00:00+0200",
        ]),
    );

    let events = normalize(&table);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].timestamp, at(2025, 6, 10, 9, 0));
}

#[test]
fn test_identity_columns_are_dropped() {
    let mut table = WideTable::new();
    table.push_column("index", cells(&["0", "1"]));
    table.push_column("ID", cells(&["10.06.2025 07:00:00+0200"]));
    table.push_column("sample3_track", cells(&["10.06.2025 08:00:00+0200"]));

    let events = normalize(&table);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].sample_id, "sample3");
}

#[test]
fn test_column_without_suffix_is_tracked() {
    let mut table = WideTable::new();
    table.push_column("manual", cells(&["10.06.2025 08:00:00+0200"]));

    let events = normalize(&table);
    assert_eq!(events[0].sample_id, "manual");
    assert_eq!(events[0].phase, Phase::Tracked);
}

#[test]
fn test_output_is_non_decreasing_across_offsets() {
    let mut table = WideTable::new();
    table.push_column(
        "sample1_plan",
        cells(&["10.06.2025 08:30:00+0200", "10.06.2025 06:10:00+0000"]),
    );
    table.push_column("sample2_plan", cells(&["10.06.2025 08:05:00+0200"]));

    let events = normalize(&table);
    assert_eq!(events.len(), 3);
    assert!(events.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    // 06:10 UTC is 08:10 +02:00
    assert_eq!(events[1].sample_id, "sample1");
}

#[test]
fn test_equal_timestamps_keep_column_order() {
    let mut table = WideTable::new();
    table.push_column("sample1_plan", cells(&["10.06.2025 09:00:00+0200"]));
    table.push_column("sample2_plan", cells(&["10.06.2025 09:00:00+0200"]));

    let events = normalize(&table);
    assert_eq!(events[0].sample_id, "sample1");
    assert_eq!(events[1].sample_id, "sample2");
}

#[test]
fn test_normalize_is_idempotent() {
    let mut table = WideTable::new();
    table.push_column(
        "sample1_plan",
        cells(&["10.06.2025 08:00:00+0200", "", "10.06.2025 09:00:00+0200"]),
    );
    table.push_column("sample1_track", cells(&["", "10.06.2025 08:02:00+0200"]));
    table.push_column("sample2_plan", cells(&["10.06.2025 08:30:00+0200"]));

    let once = normalize(&table);
    let twice = normalize(&to_wide(&once));

    assert_eq!(once, twice);
}
