use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::HistoryStore;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - an empty history file (BOM + header) if none exists yet
pub fn handle(cli: &Cli) -> AppResult<()> {
    println!("⚙️  Initializing rcopywriter…");

    let history = Config::init_all(cli.history.clone(), cli.test)?;

    // the history we just pointed at must be readable
    let posts = HistoryStore::new(&history).load()?;

    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗂️  History     : {} ({} posts)", history.display(), posts.len());
    println!("🎉 rcopywriter initialization completed!");
    Ok(())
}
