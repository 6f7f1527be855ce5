use crate::config::Config;
use crate::config::migrate::{migrate_config, missing_fields};
use crate::errors::{AppError, AppResult};

use crate::cli::parser::Commands;
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::pick_editor;
use std::process::Command;

/// Configuration as shown to the user: the API key is never printed.
fn masked(cfg: &Config) -> Config {
    let mut shown = cfg.clone();
    if let Some(key) = &shown.api_key {
        let tail: String = key
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        shown.api_key = Some(format!("****{tail}"));
    }
    shown
}

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
        // Path del file di configurazione
        let path = Config::config_file();

        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration ({}):\n", path.display());
            println!("{}", serde_yaml::to_string(&masked(cfg))?);
        }

        // ---- CHECK / MIGRATE ----
        if *check || *migrate {
            if !path.exists() {
                warning(format!(
                    "No configuration file at {} (defaults in use). Run `rcopywriter init`.",
                    path.display()
                ));
                return Ok(());
            }

            let missing = missing_fields(&path)?;
            if missing.is_empty() {
                success("Configuration file is complete.");
            } else if *migrate {
                migrate_config(&path)?;
            } else {
                warning(format!("Missing fields: {}", missing.join(", ")));
                info("Run `rcopywriter config --migrate` to add them with default values.");
            }
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            let editor_to_use = pick_editor(editor.as_deref());

            let status = Command::new(&editor_to_use)
                .arg(&path)
                .status()
                .map_err(|e| AppError::Config(format!("cannot start '{editor_to_use}': {e}")))?;

            if status.success() {
                success(format!(
                    "Configuration file edited successfully using '{}'",
                    editor_to_use
                ));
            } else {
                return Err(AppError::Config(format!(
                    "editor '{}' exited with {}",
                    editor_to_use, status
                )));
            }
        }

        if !(*print_config || *check || *migrate || *edit_config) {
            info(format!("Configuration file: {}", path.display()));
            info("Use --print, --check, --migrate or --edit.");
        }
    }

    Ok(())
}
