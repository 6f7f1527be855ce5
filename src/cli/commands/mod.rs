pub mod config;
pub mod del;
pub mod edit;
pub mod generate;
pub mod init;
pub mod list;
pub mod show;
pub mod studio;
pub mod styles;

use crate::client::OpenAiClient;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::PostRecord;
use crate::ui::messages::header;
use crate::utils::formatting::style_colour;

/// Build the generation client, or `None` when no API key is available.
pub(crate) fn build_generator(
    cfg: &Config,
    api_key: Option<&str>,
    model: Option<&str>,
    api_base: Option<&str>,
) -> AppResult<Option<OpenAiClient>> {
    cfg.resolve_api_key(api_key)
        .map(|key| {
            OpenAiClient::new(
                &key,
                api_base.unwrap_or(&cfg.api_base),
                model.unwrap_or(&cfg.model),
                cfg.request_timeout_secs,
            )
        })
        .transpose()
}

/// Print a post: label, style, then the full content.
pub(crate) fn print_post(record: &PostRecord, sep: &str) {
    header(record.label(sep));
    println!("{}", style_colour(&record.style).paint(record.style.as_str()));
    println!();
    println!("{}", record.content);
    println!();
}
