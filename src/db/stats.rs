use crate::core::normalize::normalize;
use crate::db::store::{EventStore, SqliteEventStore};
use crate::errors::AppResult;
use crate::models::phase::Phase;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

pub fn print_db_info(store: &SqliteEventStore, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) TABLE SHAPE
    //
    let table = store.read_all()?;
    println!(
        "{}• Columns:{} {}{}{}  {}• Rows:{} {}",
        CYAN,
        RESET,
        GREEN,
        table.columns.len(),
        RESET,
        CYAN,
        RESET,
        table.row_count()
    );

    //
    // 3) EVENTS PER PHASE
    //
    let events = normalize(&table);
    let planned = events.iter().filter(|e| e.phase == Phase::Planned).count();
    let tracked = events.len() - planned;
    let unreadable = table.filled_cells().saturating_sub(events.len());

    println!("{}• Planned scans:{} {}", CYAN, RESET, planned);
    println!("{}• Tracked scans:{} {}", CYAN, RESET, tracked);
    if unreadable > 0 {
        println!(
            "{}• Unreadable cells:{} {}{}{}",
            CYAN, RESET, YELLOW, unreadable, RESET
        );
    }

    //
    // 4) TIME RANGE
    //
    let first = events.first().map(|e| e.timestamp_str());
    let last = events.last().map(|e| e.timestamp_str());

    println!("{}• Time range:{}", CYAN, RESET);
    println!(
        "    from: {}",
        first.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );
    println!(
        "    to:   {}",
        last.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );

    println!();
    Ok(())
}
