use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::resolver::recent_first;
use crate::errors::AppResult;
use crate::store::HistoryStore;
use crate::ui::messages::info;
use crate::utils::formatting::{pad_right, preview, style_colour};

const PREVIEW_WIDTH: usize = 40;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { limit } = cmd {
        let store = HistoryStore::new(cfg.history_path());
        let records = store.load()?;

        if records.is_empty() {
            info("目前尚無紀錄 (no posts yet)");
            return Ok(());
        }

        let shown = limit.unwrap_or(records.len());
        let labels: Vec<String> = recent_first(&records)
            .take(shown)
            .map(|r| r.label(&cfg.label_separator))
            .collect();
        let label_width = labels
            .iter()
            .map(|l| unicode_width::UnicodeWidthStr::width(l.as_str()))
            .max()
            .unwrap_or(0);

        println!("📜 History ({} posts, most recent first)\n", records.len());

        for (i, (record, label)) in recent_first(&records).zip(labels.iter()).enumerate() {
            println!(
                "{:>3}  {}  {}  {}",
                format!("#{}", i + 1),
                pad_right(label, label_width),
                style_colour(&record.style).paint(pad_right(&record.style, 14)),
                preview(&record.content, PREVIEW_WIDTH),
            );
        }

        if shown < records.len() {
            println!("\n… {} older posts not shown", records.len() - shown);
        }
    }
    Ok(())
}
