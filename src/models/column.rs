use super::phase::Phase;
use std::fmt;

/// Typed address of one storage column: a sample and the phase it records.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnKey {
    pub sample_id: String,
    pub phase: Phase,
}

impl ColumnKey {
    pub fn new(sample_id: impl Into<String>, phase: Phase) -> Self {
        Self {
            sample_id: sample_id.into(),
            phase,
        }
    }

    pub fn plan(sample_id: impl Into<String>) -> Self {
        Self::new(sample_id, Phase::Planned)
    }

    pub fn track(sample_id: impl Into<String>) -> Self {
        Self::new(sample_id, Phase::Tracked)
    }

    /// Physical column name, e.g. `sample1_plan`.
    pub fn column_name(&self) -> String {
        format!("{}{}", self.sample_id, self.phase.suffix())
    }
}

/// Strip the `_plan` / `_track` suffix from a column name.
pub fn sample_id_of(name: &str) -> &str {
    name.strip_suffix(Phase::Planned.suffix())
        .or_else(|| name.strip_suffix(Phase::Tracked.suffix()))
        .unwrap_or(name)
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.column_name())
    }
}
