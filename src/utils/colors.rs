/// ANSI color helper utilities for terminal output.
use crate::models::phase::Phase;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Planned scans are orange-ish (yellow), tracked ones green, as on the plot.
pub fn color_for_phase(phase: Phase) -> &'static str {
    match phase {
        Phase::Planned => YELLOW,
        Phase::Tracked => GREEN,
    }
}

/// Past planned scans are greyed out.
pub fn colorize_event(value: &str, phase: Phase, is_past: bool) -> String {
    let color = if is_past && phase.is_planned() {
        GREY
    } else {
        color_for_phase(phase)
    };
    format!("{color}{value}{RESET}")
}
