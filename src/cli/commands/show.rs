use super::print_post;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::resolver::resolve;
use crate::errors::AppResult;
use crate::store::HistoryStore;
use crate::ui::messages::hint;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { selection } = cmd {
        let store = HistoryStore::new(cfg.history_path());
        let records = store.load()?;
        let record = resolve(&records, selection, &cfg.label_separator)?;

        print_post(record, &cfg.label_separator);
        hint(format!(
            "儲存修改: rcopywriter edit \"{}\" --editor",
            record.timestamp
        ));
    }
    Ok(())
}
