use super::{build_generator, print_post};
use crate::cli::parser::Commands;
use crate::client::ProductImage;
use crate::config::Config;
use crate::core::generate::{GenerateInput, GenerationFlow};
use crate::core::session::SessionBuffer;
use crate::errors::{AppError, AppResult};
use crate::models::Style;
use crate::store::HistoryStore;
use crate::ui::messages::{busy, hint, success};
use std::path::Path;

/// Generate a new post and save it to the history.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Generate {
        image,
        name,
        style,
        api_key,
        model,
        api_base,
    } = cmd
    {
        //
        // 1. Resolve style (default from config)
        //
        let style = match style {
            Some(s) => Style::from_input(s).ok_or_else(|| AppError::InvalidStyle(s.clone()))?,
            None => cfg.style()?,
        };

        //
        // 2. Product name
        //
        let product_name = name
            .clone()
            .unwrap_or_else(|| cfg.default_product_name.clone());

        //
        // 3. Read the photo
        //
        let img = ProductImage::open(Path::new(image))?;

        //
        // 4. Client (None = no API key → the flow reports it)
        //
        let generator = build_generator(
            cfg,
            api_key.as_deref(),
            model.as_deref(),
            api_base.as_deref(),
        )?;

        //
        // 5. Run
        //
        let store = HistoryStore::new(cfg.history_path());
        let mut buffer = SessionBuffer::new();

        if generator.is_some() {
            busy(format!("AI 寫作中... ({style})"));
        }

        let record = GenerationFlow::new().run(
            &store,
            &mut buffer,
            generator.as_ref(),
            GenerateInput {
                image: Some(&img),
                product_name: &product_name,
                style,
            },
        )?;

        success("已生成並存檔！");
        print_post(&record, &cfg.label_separator);
        hint("To revise it: rcopywriter edit 1 --editor");
    }

    Ok(())
}
