use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::resolver::Selection;
use crate::core::session::SessionBuffer;
use crate::errors::{AppError, AppResult};
use crate::store::HistoryStore;
use crate::ui::messages::{info, success};
use crate::ui::prompt::edit_in_editor;
use std::fs;

/// Overwrite the content of a saved post.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        selection,
        content,
        file,
        editor,
    } = cmd
    {
        let store = HistoryStore::new(cfg.history_path());
        let records = store.load()?;
        let stamp = Selection::parse(selection, &cfg.label_separator)?.timestamp(&records)?;

        let Some(record) = records.iter().find(|r| r.timestamp == stamp) else {
            // updating an absent key touches no row
            let text = new_text(content, file, *editor, "")?;
            store.update(&stamp, &text)?;
            info(format!("No post at {stamp}, nothing changed."));
            return Ok(());
        };

        // selecting a post binds the buffer to it
        let mut buffer = SessionBuffer::new();
        buffer.on_load(record);

        let text = new_text(content, file, *editor, buffer.content())?;
        if text == buffer.content() {
            info("Content unchanged, nothing to save.");
            return Ok(());
        }

        buffer.edit(text);
        match buffer.save_edit(&store)? {
            0 => info(format!("{} no longer exists, nothing saved.", record.timestamp)),
            _ => success(format!(
                "修改已儲存！ ({})",
                record.label(&cfg.label_separator)
            )),
        }
    }
    Ok(())
}

fn new_text(
    content: &Option<String>,
    file: &Option<String>,
    editor: bool,
    current: &str,
) -> AppResult<String> {
    if let Some(text) = content {
        Ok(text.clone())
    } else if let Some(path) = file {
        Ok(fs::read_to_string(path)?)
    } else if editor {
        edit_in_editor(current, None)
    } else {
        Err(AppError::Other(
            "one of --content, --file or --editor is required".into(),
        ))
    }
}
