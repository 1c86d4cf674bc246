use crate::ui::messages::{info, success};
use rusqlite::{Connection, Error, OptionalExtension};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::io;
use std::path::Path;

const VERSION: &str = "20250612_0002_schedule_settings";

/// Wrap an I/O failure so the migration runner does not mark it applied.
fn to_sql_error(context: String) -> Error {
    Error::SqliteFailure(rusqlite::ffi::Error::new(1), Some(context))
}

/// Insert `key: value` into the mapping if it is missing.
fn ensure_key(map: &mut Mapping, key: &str, value: Value, actions: &mut Vec<String>) {
    let k = Value::String(key.to_string());
    if !map.contains_key(&k) {
        map.insert(k, value);
        actions.push(format!("added '{}'", key));
    }
}

/// Rename the misspelt `inital_repetitions` key inside every sample profile.
fn fix_repetitions_typo(map: &mut Mapping, actions: &mut Vec<String>) {
    let Some(samples) = map
        .get_mut(Value::String("samples".into()))
        .and_then(Value::as_mapping_mut)
    else {
        return;
    };

    let old = Value::String("inital_repetitions".into());
    let new = Value::String("initial_repetitions".into());

    for (id, profile) in samples.iter_mut() {
        if let Some(profile) = profile.as_mapping_mut()
            && let Some(v) = profile.remove(&old)
        {
            if !profile.contains_key(&new) {
                profile.insert(new.clone(), v);
            }
            actions.push(format!(
                "renamed inital_repetitions for {}",
                id.as_str().unwrap_or("?")
            ));
        }
    }
}

/// File-only part of the migration. Returns the list of changes applied;
/// an empty list means the file was already current (or does not exist).
pub fn migrate_config_file(conf_file: &Path) -> io::Result<Vec<String>> {
    let mut actions = Vec::new();

    if !conf_file.exists() {
        return Ok(actions);
    }

    let content = fs::read_to_string(conf_file)?;
    let Ok(mut yaml) = serde_yaml::from_str::<Value>(&content) else {
        return Ok(actions);
    };
    let Some(map) = yaml.as_mapping_mut() else {
        return Ok(actions);
    };

    ensure_key(map, "utc_offset", Value::String("+02:00".into()), &mut actions);
    ensure_key(map, "initial_interval_minutes", Value::Number(3.into()), &mut actions);
    ensure_key(map, "countdown_refresh_secs", Value::Number(1.into()), &mut actions);
    ensure_key(map, "busy_timeout_ms", Value::Number(5000.into()), &mut actions);
    ensure_key(map, "storage_retries", Value::Number(3.into()), &mut actions);
    fix_repetitions_typo(map, &mut actions);

    if actions.is_empty() {
        return Ok(actions);
    }

    let serialized = serde_yaml::to_string(&yaml)
        .map_err(|e| io::Error::other(format!("serialize error: {}", e)))?;

    // Document the offset setting right below it
    let mut new_content = String::new();
    for line in serialized.lines() {
        new_content.push_str(line);
        new_content.push('\n');

        if line.starts_with("utc_offset:") {
            new_content.push_str(
                "# utc_offset options:\n\
                 #   +HH:MM / -HH:MM → fixed offset written into every timestamp\n\
                 #   utc             → +00:00\n\
                 #   local           → offset of this machine at startup\n\
                 # the default +02:00 is CEST; use +01:00 for a winter campaign\n",
            );
        }
    }

    fs::write(conf_file, new_content)?;
    Ok(actions)
}

/// Bring the YAML config up to date and mark the migration as applied in the
/// `log` table.
pub fn run_config_migration(conn: &Connection) -> Result<(), Error> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log WHERE operation = 'migration_applied' AND target = ?1 LIMIT 1",
    )?;
    if chk.query_row([VERSION], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    let conf_file = super::Config::config_file();

    let actions = migrate_config_file(&conf_file).map_err(|e| {
        to_sql_error(format!("Failed to migrate config {:?}: {}", conf_file, e))
    })?;

    if !actions.is_empty() {
        info(format!(
            "Config migration ({}) performed: {}",
            VERSION,
            actions.join("; ")
        ));
    }

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Schedule settings added to config')",
        [VERSION],
    )?;

    success(format!("Migration applied: {}", VERSION));
    Ok(())
}
