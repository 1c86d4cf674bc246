use crate::config::Config;
use crate::config::migrate::migrate_config_file;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};

use crate::cli::parser::Commands;
use std::fs;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration:\n");
            let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
            println!("{}", yaml);
        }

        // ---- CHECK CONFIG ----
        if *check {
            if !path.exists() {
                warning(format!(
                    "No configuration file at {} (defaults in use)",
                    path.display()
                ));
            } else {
                let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
                let missing = missing_keys(&content)?;
                if missing.is_empty() {
                    success("Configuration file is complete.");
                } else {
                    warning(format!(
                        "Missing fields: {} (run `config --migrate`)",
                        missing.join(", ")
                    ));
                }
            }
        }

        // ---- MIGRATE CONFIG ----
        if *migrate {
            let actions = migrate_config_file(&path)?;
            if actions.is_empty() {
                info("Configuration already up to date.");
            } else {
                success(format!("Configuration migrated: {}", actions.join("; ")));
            }
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            let default_editor = std::env::var("EDITOR")
                .or_else(|_| std::env::var("VISUAL"))
                .unwrap_or_else(|_| {
                    if cfg!(target_os = "windows") {
                        "notepad".to_string()
                    } else {
                        "nano".to_string()
                    }
                });

            let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

            match Command::new(&editor_to_use).arg(&path).status() {
                Ok(s) if s.success() => {
                    success(format!(
                        "Configuration file edited successfully using '{}'",
                        editor_to_use
                    ));
                }
                Ok(_) | Err(_) => {
                    warning(format!(
                        "Editor '{}' not available, falling back to '{}'",
                        editor_to_use, default_editor
                    ));

                    match Command::new(&default_editor).arg(&path).status() {
                        Ok(s) if s.success() => success(format!(
                            "Configuration file edited successfully using fallback '{}'",
                            default_editor
                        )),
                        Ok(_) | Err(_) => {
                            return Err(AppError::Config(format!(
                                "failed to edit configuration file using fallback '{}'",
                                default_editor
                            )));
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

/// Top-level keys a current config file should have.
const EXPECTED_KEYS: [&str; 7] = [
    "database",
    "utc_offset",
    "initial_interval_minutes",
    "countdown_refresh_secs",
    "busy_timeout_ms",
    "storage_retries",
    "samples",
];

fn missing_keys(content: &str) -> AppResult<Vec<&'static str>> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))?;
    let Some(map) = yaml.as_mapping() else {
        return Err(AppError::Config("configuration is not a mapping".into()));
    };

    Ok(EXPECTED_KEYS
        .into_iter()
        .filter(|k| !map.contains_key(serde_yaml::Value::String((*k).to_string())))
        .collect())
}
