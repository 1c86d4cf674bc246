use crate::core::next::Countdown;
use crate::core::state::AppState;
use crate::db::store::EventStore;
use crate::errors::AppResult;
use crate::ui::messages::transient;
use crate::utils::colors::{BOLD, CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::time::now_in;
use chrono::{DateTime, FixedOffset};
use std::io::{self, IsTerminal, Write};
use std::thread;
use std::time::Duration;

pub struct CountdownLogic;

impl CountdownLogic {
    /// One countdown frame, recomputed from the store. A store that cannot be
    /// read (empty database, schema not created yet, lock timeout) yields
    /// `Countdown::NoData` instead of an error.
    pub fn tick(store: &dyn EventStore, now: DateTime<FixedOffset>) -> Countdown {
        match AppState::load(store) {
            Ok(state) => state.countdown(now),
            Err(e) => {
                transient(format!("Could not read scans: {}", e));
                Countdown::NoData
            }
        }
    }

    /// Redraw the countdown every `refresh` until `ticks` frames were shown
    /// (or forever when `ticks` is None).
    pub fn watch(
        store: &dyn EventStore,
        offset: FixedOffset,
        refresh: Duration,
        ticks: Option<u64>,
    ) -> AppResult<()> {
        let interactive = io::stdout().is_terminal();
        let mut shown = 0u64;

        loop {
            let now = now_in(offset);
            let frame = Self::tick(store, now);

            if interactive {
                // clear screen, cursor home
                print!("\x1b[2J\x1b[H");
            }
            print_frame(&frame, now);
            io::stdout().flush()?;

            shown += 1;
            if ticks.is_some_and(|t| shown >= t) {
                return Ok(());
            }
            thread::sleep(refresh);
        }
    }
}

pub fn print_frame(frame: &Countdown, now: DateTime<FixedOffset>) {
    let color = match frame {
        Countdown::Upcoming { .. } => YELLOW,
        Countdown::NoUpcoming => GREEN,
        Countdown::NoData => GREY,
    };

    println!(
        "{}{}⏱  {}{}",
        CYAN,
        BOLD,
        now.format("%d.%m.%Y %H:%M:%S"),
        RESET
    );
    println!("{}{}{}", color, frame.render(), RESET);
}
