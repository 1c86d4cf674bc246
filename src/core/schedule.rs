//! Planned scan timestamps for one sample.

use crate::models::sample::SampleProfile;
use chrono::{DateTime, Duration, FixedOffset};

/// Spacing of the long-tail block.
pub const LONG_TERM_INTERVAL_MINUTES: i64 = 60;

/// Build the planned scan times of `profile`, starting at `start`.
///
/// Default rule: `initial_repetitions` scans from `start` every initial
/// interval, then `duration_hours` scans from `start + 1h` every hour. The two
/// blocks are concatenated as they are, so a long initial block can overlap
/// the hourly one.
///
/// Profiles with `custom_intervals_minutes` instead get one scan at `start`
/// and one more after each listed interval.
pub fn generate(
    profile: &SampleProfile,
    start: DateTime<FixedOffset>,
    default_interval_minutes: u32,
) -> Vec<DateTime<FixedOffset>> {
    if !profile.custom_intervals_minutes.is_empty() {
        return custom_block(start, &profile.custom_intervals_minutes);
    }

    let interval = profile
        .initial_interval_minutes
        .unwrap_or(default_interval_minutes);

    let mut out = Vec::new();
    out.extend(evenly_spaced(
        start,
        profile.initial_repetitions,
        Duration::minutes(interval as i64),
    ));
    out.extend(evenly_spaced(
        start + Duration::minutes(LONG_TERM_INTERVAL_MINUTES),
        profile.duration_hours,
        Duration::minutes(LONG_TERM_INTERVAL_MINUTES),
    ));
    out
}

/// `count` instants from `first`, `step` apart. Stops early once an offset
/// no longer fits the time range.
pub fn evenly_spaced(
    first: DateTime<FixedOffset>,
    count: u32,
    step: Duration,
) -> impl Iterator<Item = DateTime<FixedOffset>> {
    (0..count).map_while(move |i| {
        step.checked_mul(i32::try_from(i).ok()?)
            .and_then(|offset| first.checked_add_signed(offset))
    })
}

fn custom_block(start: DateTime<FixedOffset>, intervals: &[u32]) -> Vec<DateTime<FixedOffset>> {
    let mut out = Vec::with_capacity(intervals.len() + 1);
    let mut t = start;
    out.push(t);
    for minutes in intervals {
        t += Duration::minutes(*minutes as i64);
        out.push(t);
    }
    out
}
