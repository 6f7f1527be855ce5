use crate::client::openai::{DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::errors::{AppError, AppResult};
use crate::models::Style;
use crate::store::file::write_table;
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

pub mod migrate; // use submodule at src/config/migrate.rs

/// Environment variable holding the API key secret.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable overriding the configuration directory.
pub const HOME_ENV: &str = "RCOPYWRITER_HOME";

pub const DEFAULT_PRODUCT_NAME: &str = "未命名商品";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_history_file")]
    pub history_file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_product_name")]
    pub default_product_name: String,
    #[serde(default = "default_style")]
    pub default_style: String,
    #[serde(default = "default_label_separator")]
    pub label_separator: String,
    #[serde(default)]
    pub request_timeout_secs: u64,
}

fn default_history_file() -> String {
    Config::history_default_path().to_string_lossy().to_string()
}
fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_product_name() -> String {
    DEFAULT_PRODUCT_NAME.to_string()
}
fn default_style() -> String {
    Style::default().label().to_string()
}
fn default_label_separator() -> String {
    " | ".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_file: default_history_file(),
            api_key: None,
            api_base: default_api_base(),
            model: default_model(),
            default_product_name: default_product_name(),
            default_style: default_style(),
            label_separator: default_label_separator(),
            request_timeout_secs: 0,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if let Ok(dir) = env::var(HOME_ENV)
            && !dir.trim().is_empty()
        {
            return expand_tilde(&dir);
        }

        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rcopywriter")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rcopywriter")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rcopywriter.conf")
    }

    /// Return the default path of the history file
    pub fn history_default_path() -> PathBuf {
        Self::config_dir().join("history.csv")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        let cfg = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            serde_yaml::from_str::<Config>(&content).map_err(|e| {
                warn!(path = %path.display(), error = %e, "unparseable configuration");
                AppError::ConfigLoad
            })?
        } else {
            Config::default()
        };

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.label_separator.is_empty() {
            return Err(AppError::Config("label_separator must not be empty".into()));
        }
        if !separator_is_unambiguous(&self.label_separator) {
            return Err(AppError::Config(format!(
                "label_separator '{}' can occur inside a timestamp",
                self.label_separator
            )));
        }
        self.style()?;
        Ok(())
    }

    /// History file with `~/` expanded.
    pub fn history_path(&self) -> PathBuf {
        expand_tilde(&self.history_file)
    }

    /// Configured default tone preset.
    pub fn style(&self) -> AppResult<Style> {
        Style::from_input(&self.default_style)
            .ok_or_else(|| AppError::InvalidStyle(self.default_style.clone()))
    }

    /// API key lookup: explicit value, then environment secret, then config file.
    pub fn resolve_api_key(&self, explicit: Option<&str>) -> Option<String> {
        let non_empty = |s: &str| {
            let t = s.trim();
            (!t.is_empty()).then(|| t.to_string())
        };

        explicit
            .and_then(non_empty)
            .or_else(|| env::var(API_KEY_ENV).ok().as_deref().and_then(non_empty))
            .or_else(|| self.api_key.as_deref().and_then(non_empty))
    }

    /// Write the configuration file.
    pub fn save(&self) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        fs::create_dir_all(Self::config_dir()).map_err(|_| AppError::ConfigSave)?;
        fs::write(Self::config_file(), yaml).map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Initialize configuration and history files, returning the history path
    pub fn init_all(custom_history: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // History name: user provided or default
        let history_path = match custom_history {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::history_default_path(),
        };

        let config = Config {
            history_file: history_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            config.save()?;
            success(format!("Config file: {}", Self::config_file().display()));
        }

        // Create empty history (BOM + header) if not exists
        if !history_path.exists() {
            write_table(&history_path, &[])?;
        }

        success(format!("History:     {}", history_path.display()));

        Ok(history_path)
    }
}

/// Shape of every record key, digits folded to `0`.
const STAMP_SHAPE: &str = "0000-00-00 00:00:00";

/// False when `sep` can start inside a timestamp, either wholly contained in
/// it or running past its end into the label.
fn separator_is_unambiguous(sep: &str) -> bool {
    let fold = |c: char| if c.is_ascii_digit() { '0' } else { c };
    let sep: Vec<char> = sep.chars().map(fold).collect();
    let stamp: Vec<char> = STAMP_SHAPE.chars().collect();

    (0..stamp.len()).all(|start| {
        let tail = &stamp[start..];
        let n = tail.len().min(sep.len());
        tail[..n] != sep[..n]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_gets_defaults() {
        let cfg: Config = serde_yaml::from_str("history_file: /tmp/h.csv\nmodel: other\n").unwrap();
        assert_eq!(cfg.history_file, "/tmp/h.csv");
        assert_eq!(cfg.model, "other");
        assert_eq!(cfg.default_product_name, "未命名商品");
        assert_eq!(cfg.label_separator, " | ");
        assert_eq!(cfg.request_timeout_secs, 0);
        assert!(cfg.api_key.is_none());
        assert_eq!(cfg.style().unwrap(), Style::Hype);
    }

    #[test]
    fn explicit_key_wins() {
        let cfg = Config {
            api_key: Some("from-config".into()),
            ..Config::default()
        };
        assert_eq!(cfg.resolve_api_key(Some("flag")).as_deref(), Some("flag"));
    }

    #[test]
    fn empty_separator_is_rejected() {
        let cfg = Config {
            label_separator: String::new(),
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn separator_found_in_timestamps_is_rejected() {
        for sep in [":", "-", " ", "0", "7", ":0", "5 |", " 1"] {
            let cfg = Config {
                label_separator: sep.into(),
                ..Config::default()
            };
            assert!(
                matches!(cfg.validate(), Err(AppError::Config(_))),
                "separator {sep:?} accepted"
            );
        }

        for sep in [" | ", " :: ", " - ", "@", "｜"] {
            let cfg = Config {
                label_separator: sep.into(),
                ..Config::default()
            };
            assert!(cfg.validate().is_ok(), "separator {sep:?} rejected");
        }
    }

    #[test]
    fn unknown_default_style_is_rejected() {
        let cfg = Config {
            default_style: "shouty".into(),
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(AppError::InvalidStyle(_))));
    }
}
