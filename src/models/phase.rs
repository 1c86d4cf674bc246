use serde::Serialize;
use std::fmt;

/// Whether a scan timestamp was scheduled ahead of time or confirmed by an operator.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Planned,
    Tracked,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Planned => "planned",
            Phase::Tracked => "tracked",
        }
    }

    /// Storage column suffix.
    pub fn suffix(&self) -> &'static str {
        match self {
            Phase::Planned => "_plan",
            Phase::Tracked => "_track",
        }
    }

    /// Parse user input ("planned", "plan", "tracked", "track").
    pub fn from_input(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "planned" | "plan" | "p" => Some(Phase::Planned),
            "tracked" | "track" | "t" => Some(Phase::Tracked),
            _ => None,
        }
    }

    /// Column names ending in `_plan` are planned; everything else is tracked.
    pub fn from_column_name(name: &str) -> Self {
        if name.ends_with(Phase::Planned.suffix()) {
            Phase::Planned
        } else {
            Phase::Tracked
        }
    }

    pub fn is_planned(&self) -> bool {
        matches!(self, Phase::Planned)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
