//! Bring an older configuration file up to date with the current fields.

use super::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    match serde_yaml::from_str::<Value>(&content).map_err(|_| AppError::ConfigLoad)? {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{}: top level must be a mapping",
            path.display()
        ))),
    }
}

fn default_mapping() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default())? {
        Value::Mapping(m) => Ok(m),
        _ => Err(AppError::Other("default configuration is not a mapping".into())),
    }
}

/// Fields the file at `path` does not set (defaults apply to them).
pub fn missing_fields(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let defaults = default_mapping()?;

    Ok(defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Write every missing field with its default value, keeping existing ones.
///   Returns:
///   Ok(true)  → config updated
///   Ok(false) → no change needed
pub fn migrate_config(path: &Path) -> AppResult<bool> {
    let mut current = read_mapping(path)?;
    let defaults = default_mapping()?;

    let mut changed = false;
    for (k, v) in defaults {
        if !current.contains_key(&k) {
            if let Some(name) = k.as_str() {
                info(format!("Adding missing field '{name}'"));
            }
            current.insert(k, v);
            changed = true;
        }
    }

    if changed {
        let yaml = serde_yaml::to_string(&Value::Mapping(current))
            .map_err(|_| AppError::ConfigSave)?;
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)?;
        success(format!("Configuration updated: {}", path.display()));
    }

    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reports_and_fills_missing_fields() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("rcopywriter.conf");
        fs::write(&p, "history_file: /tmp/x.csv\nmodel: custom\n").unwrap();

        let missing = missing_fields(&p).unwrap();
        assert!(missing.contains(&"label_separator".to_string()));
        assert!(!missing.contains(&"model".to_string()));
        assert!(!missing.contains(&"api_key".to_string()));

        assert!(migrate_config(&p).unwrap());
        assert!(missing_fields(&p).unwrap().is_empty());
        let cfg: Config = serde_yaml::from_str(&fs::read_to_string(&p).unwrap()).unwrap();
        assert_eq!(cfg.model, "custom");
        assert_eq!(cfg.history_file, "/tmp/x.csv");

        assert!(!migrate_config(&p).unwrap());
    }
}
