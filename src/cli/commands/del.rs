use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::resolver::Selection;
use crate::errors::AppResult;
use crate::store::HistoryStore;
use crate::ui::messages::{info, success};
use crate::ui::prompt::ask_confirmation;

use std::io;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { selection, yes } = cmd {
        let store = HistoryStore::new(cfg.history_path());
        let records = store.load()?;
        let stamp = Selection::parse(selection, &cfg.label_separator)?.timestamp(&records)?;

        let Some(record) = records.iter().find(|r| r.timestamp == stamp) else {
            // deleting an absent key is a no-op
            store.delete(&stamp)?;
            info(format!("No post at {stamp}, nothing changed."));
            return Ok(());
        };
        let label = record.label(&cfg.label_separator);

        //
        // Confirmation prompt
        //
        if !*yes {
            let prompt = format!("Delete post '{}'? This action is irreversible.", label);
            if !ask_confirmation(&mut io::stdin().lock(), &prompt) {
                info("Operation cancelled.");
                return Ok(());
            }
        }

        //
        // Execute deletion
        //
        let removed = store.delete(&stamp)?;
        if removed > 0 {
            success(format!("已刪除該筆紀錄！ ({})", label));
        } else {
            info(format!("{} was already gone.", label));
        }
    }

    Ok(())
}
