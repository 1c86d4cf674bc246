use crate::errors::{AppError, AppResult};
use crate::models::sample::{SampleProfile, TreatmentProfile};
use crate::utils::path::expand_tilde;
use crate::utils::time::parse_offset;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

pub mod migrate; // use submodule at src/config/migrate.rs

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,

    /// Fixed UTC offset of every timestamp ("+02:00", "utc" or "local").
    /// No DST handling: "+02:00" is summer time in central Europe.
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,

    /// Spacing of the initial scan block when a sample does not override it.
    #[serde(default = "default_initial_interval")]
    pub initial_interval_minutes: u32,

    #[serde(default = "default_countdown_refresh")]
    pub countdown_refresh_secs: u64,

    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_ms: u64,

    #[serde(default = "default_storage_retries")]
    pub storage_retries: u32,

    #[serde(default = "default_samples")]
    pub samples: BTreeMap<String, SampleProfile>,
}

fn default_utc_offset() -> String {
    "+02:00".to_string()
}
fn default_initial_interval() -> u32 {
    3
}
fn default_countdown_refresh() -> u64 {
    1
}
fn default_busy_timeout() -> u64 {
    5000
}
fn default_storage_retries() -> u32 {
    3
}

/// Samples of the KOH leaching campaign.
pub fn default_samples() -> BTreeMap<String, SampleProfile> {
    use TreatmentProfile::{OneStep, TwoStep};

    let rows: [(&str, &str, &str, TreatmentProfile, u32, u32); 9] = [
        ("sample1", "90°C", "KOH + KNa-T", TwoStep, 24, 4),
        ("sample2", "80°C", "KOH + KNa-T", TwoStep, 24, 1),
        ("sample3", "70°C", "KOH + KNa-T", TwoStep, 24, 1),
        ("sample4", "90°C", "KOH + KNa-T", OneStep, 24, 2),
        ("sample5", "80°C", "KOH + KNa-T", OneStep, 24, 1),
        ("sample6", "70°C", "KOH + KNa-T", OneStep, 24, 1),
        ("sample7", "90°C", "KOH", OneStep, 12, 1),
        ("sample8", "80°C", "KOH", OneStep, 12, 1),
        ("sample9", "70°C", "KOH", OneStep, 12, 1),
    ];

    rows.into_iter()
        .map(|(id, t, solution, profile, duration, reps)| {
            (
                id.to_string(),
                SampleProfile::new(t, solution, profile, duration, reps),
            )
        })
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            utc_offset: default_utc_offset(),
            initial_interval_minutes: default_initial_interval(),
            countdown_refresh_secs: default_countdown_refresh(),
            busy_timeout_ms: default_busy_timeout(),
            storage_retries: default_storage_retries(),
            samples: default_samples(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("ctscan-tracker")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".ctscan-tracker")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("ctscan-tracker.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("ctscan-tracker.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
        } else {
            Ok(Config::default())
        }
    }

    /// Parsed `utc_offset`.
    pub fn offset(&self) -> AppResult<FixedOffset> {
        parse_offset(&self.utc_offset)
    }

    /// Profile of a configured sample.
    pub fn sample(&self, sample_id: &str) -> AppResult<&SampleProfile> {
        self.samples
            .get(sample_id)
            .ok_or_else(|| AppError::UnknownSample(sample_id.to_string()))
    }

    /// Database path for a `--db` value: absolute paths and `~/…` are used
    /// as given, bare names live in the config directory.
    pub fn resolve_db_path(name: &str) -> PathBuf {
        let p = expand_tilde(name);
        if p.is_absolute() {
            p
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Initialize configuration and database files. Returns the database path.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => Self::resolve_db_path(&name),
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigSave)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            if let Some(parent) = db_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::File::create(&db_path).map_err(|e| {
                io::Error::new(e.kind(), format!("{}: {}", db_path.display(), e))
            })?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(db_path)
    }
}
