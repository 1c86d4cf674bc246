use crate::models::scan_event::ScanEvent;
use crate::utils::time::format_countdown;
use chrono::{DateTime, Duration, FixedOffset};

/// Nearest planned event strictly after `now`. On equal timestamps the
/// first one in `events` wins.
pub fn next_after(events: &[ScanEvent], now: DateTime<FixedOffset>) -> Option<&ScanEvent> {
    events
        .iter()
        .filter(|e| e.phase.is_planned() && e.timestamp > now)
        .min_by_key(|e| e.timestamp)
}

/// What the countdown shows for one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Countdown {
    Upcoming {
        sample_id: String,
        scheduled: DateTime<FixedOffset>,
        remaining: Duration,
    },
    NoUpcoming,
    /// Nothing stored yet, or the store could not be read this tick.
    NoData,
}

impl Countdown {
    pub fn compute(events: &[ScanEvent], now: DateTime<FixedOffset>) -> Self {
        if events.is_empty() {
            return Countdown::NoData;
        }
        match next_after(events, now) {
            Some(ev) => Countdown::Upcoming {
                sample_id: ev.sample_id.clone(),
                scheduled: ev.timestamp,
                remaining: ev.timestamp - now,
            },
            None => Countdown::NoUpcoming,
        }
    }

    pub fn render(&self) -> String {
        match self {
            Countdown::Upcoming {
                sample_id,
                scheduled,
                remaining,
            } => format!(
                "Next Scan: {}\n  - Scheduled: {}\n  - Countdown: {} remaining",
                sample_id,
                scheduled.format("%H:%M:%S (%A)"),
                format_countdown(*remaining)
            ),
            Countdown::NoUpcoming => "No upcoming scans found.".to_string(),
            Countdown::NoData => "No experiment initialized yet.".to_string(),
        }
    }
}
