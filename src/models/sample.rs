use serde::{Deserialize, Serialize};
use std::fmt;

/// Leaching treatment applied to a sample.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TreatmentProfile {
    #[serde(rename = "1 step", alias = "one_step")]
    OneStep,
    #[serde(rename = "2 step", alias = "two_step")]
    TwoStep,
}

impl fmt::Display for TreatmentProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreatmentProfile::OneStep => f.write_str("1 step"),
            TreatmentProfile::TwoStep => f.write_str("2 step"),
        }
    }
}

/// Static scan configuration of one sample.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SampleProfile {
    pub temperature: String,
    pub solution: String,
    pub treatment_profile: TreatmentProfile,

    /// Hourly scans after the initial block.
    pub duration_hours: u32,

    #[serde(default = "default_initial_repetitions")]
    pub initial_repetitions: u32,

    /// Falls back to `Config::initial_interval_minutes` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_interval_minutes: Option<u32>,

    /// Explicit interval sequence; replaces the initial/hourly rule when set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_intervals_minutes: Vec<u32>,
}

fn default_initial_repetitions() -> u32 {
    1
}

impl SampleProfile {
    pub fn new(
        temperature: &str,
        solution: &str,
        treatment_profile: TreatmentProfile,
        duration_hours: u32,
        initial_repetitions: u32,
    ) -> Self {
        Self {
            temperature: temperature.to_string(),
            solution: solution.to_string(),
            treatment_profile,
            duration_hours,
            initial_repetitions,
            initial_interval_minutes: None,
            custom_intervals_minutes: Vec::new(),
        }
    }

    pub fn with_initial_interval(mut self, minutes: u32) -> Self {
        self.initial_interval_minutes = Some(minutes);
        self
    }

    pub fn with_custom_intervals(mut self, intervals: Vec<u32>) -> Self {
        self.custom_intervals_minutes = intervals;
        self
    }

    /// Number of planned scans this profile produces.
    pub fn planned_count(&self) -> usize {
        if self.custom_intervals_minutes.is_empty() {
            (self.initial_repetitions + self.duration_hours) as usize
        } else {
            self.custom_intervals_minutes.len() + 1
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "{} | {} | {} | {}h",
            self.temperature, self.solution, self.treatment_profile, self.duration_hours
        )
    }
}
