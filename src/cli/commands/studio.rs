//! Interactive session: the buffer and the current selections live for the
//! whole session, one command per line.

use super::{build_generator, print_post};
use crate::cli::parser::Commands;
use crate::client::ProductImage;
use crate::config::Config;
use crate::core::generate::{GenerateInput, GenerationFlow};
use crate::core::resolver::{Selection, recent_first};
use crate::core::session::{Binding, SessionBuffer};
use crate::errors::{AppError, AppResult};
use crate::models::{PostRecord, Style};
use crate::store::HistoryStore;
use crate::ui::messages::{busy, error, header, hint, info, success, warning};
use crate::ui::prompt::{END_OF_TEXT, edit_in_editor, read_multiline};
use crate::utils::formatting::{preview, style_colour};
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::debug;

/// What the loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Studio { api_key, api_base } = cmd {
        let mut studio = Studio::new(cfg, api_key.clone(), api_base.clone())?;
        let stdin = io::stdin();
        let mut input = stdin.lock();
        studio.run(&mut input)?;
    }
    Ok(())
}

pub struct Studio<'c> {
    cfg: &'c Config,
    store: HistoryStore,
    buffer: SessionBuffer,
    flow: GenerationFlow,
    image: Option<ProductImage>,
    product_name: String,
    style: Style,
    selected: Option<String>,
    api_key: Option<String>,
    api_base: Option<String>,
}

impl<'c> Studio<'c> {
    pub fn new(
        cfg: &'c Config,
        api_key: Option<String>,
        api_base: Option<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            cfg,
            store: HistoryStore::new(cfg.history_path()),
            buffer: SessionBuffer::new(),
            flow: GenerationFlow::new(),
            image: None,
            product_name: cfg.default_product_name.clone(),
            style: cfg.style()?,
            selected: None,
            api_key,
            api_base,
        })
    }

    pub fn buffer(&self) -> &SessionBuffer {
        &self.buffer
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Read commands until `quit` or end of input.
    ///
    /// Input errors are reported inline; history read/write failures end the
    /// session.
    pub fn run<R: BufRead>(&mut self, input: &mut R) -> AppResult<()> {
        header("FB 社團文案神器 (rcopywriter studio)");
        hint("Type `help` for the list of commands.");
        self.render_history()?;

        loop {
            self.print_prompt();

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                println!();
                break;
            }

            match self.execute(line.trim(), input) {
                Ok(Step::Quit) => break,
                Ok(Step::Continue) => {}
                Err(e @ (AppError::Io(_) | AppError::Csv(_))) => return Err(e),
                Err(e) => error(e),
            }
        }

        info("Bye 👋");
        Ok(())
    }

    fn print_prompt(&self) {
        match self.buffer.binding() {
            Binding::BoundTo(ts) => print!("[✏️  {ts}] > "),
            Binding::Unbound => print!("> "),
        }
        let _ = io::stdout().flush();
    }

    /// Run one command line.
    pub fn execute<R: BufRead>(&mut self, line: &str, input: &mut R) -> AppResult<Step> {
        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };
        debug!(cmd, "studio command");

        match cmd.to_lowercase().as_str() {
            "" => {}
            "help" | "?" => self.print_help(),
            "quit" | "exit" | "q" => return Ok(Step::Quit),
            "status" => self.print_status(),
            "key" => self.set_key(arg),
            "image" | "upload" => self.set_image(arg)?,
            "name" => self.set_name(arg),
            "style" => self.set_style(arg)?,
            "generate" | "gen" => self.generate()?,
            "history" | "list" => self.render_history()?,
            "select" => self.select(arg)?,
            "load" => self.load(arg)?,
            "delete" | "del" => self.delete(arg)?,
            "show" => self.show(),
            "edit" => {
                println!("Enter the new text, end with a line containing only `{END_OF_TEXT}`:");
                let text = read_multiline(input)?;
                self.buffer.edit(text);
                self.show();
            }
            "editor" => {
                let edited = edit_in_editor(self.buffer.content(), None)?;
                self.buffer.edit(edited);
                self.show();
            }
            "save" => self.save()?,
            other => {
                return Err(AppError::InvalidSelection(format!(
                    "unknown command '{other}' (type `help`)"
                )));
            }
        }

        Ok(Step::Continue)
    }

    fn print_help(&self) {
        println!("  image <file>       upload a product photo (.jpg/.jpeg/.png)");
        println!("  name <text>        product name (now: {})", self.product_name);
        println!("  style [n|alias]    tone preset (now: {})", self.style);
        println!("  key <api-key>      API key for this session");
        println!("  generate           write new copy for the current photo");
        println!("  history            list saved posts, most recent first");
        println!("  select <n|label>   pick a saved post");
        println!("  load [n|label]     open the selected post for editing");
        println!("  delete [n|label]   delete the selected post");
        println!("  show               print the text area");
        println!("  edit | editor      replace the text (typed, or in $EDITOR)");
        if self.buffer.can_save() {
            println!("  save               💾 儲存修改 (overwrite the loaded post)");
        }
        println!("  status | quit");
    }

    fn print_status(&self) {
        let image = self
            .image
            .as_ref()
            .map(|i| format!("{} ({} bytes)", i.file_name, i.bytes.len()))
            .unwrap_or_else(|| "-".into());
        let key = if self.cfg.resolve_api_key(self.api_key.as_deref()).is_some() {
            "set"
        } else {
            "missing"
        };
        println!("image   : {image}");
        println!("name    : {}", self.product_name);
        println!("style   : {}", self.style);
        println!("api key : {key}");
        println!("editing : {}", self.buffer.bound_timestamp().unwrap_or("-"));
    }

    fn set_key(&mut self, arg: &str) {
        if arg.is_empty() {
            self.api_key = None;
            info("Session API key cleared.");
        } else {
            self.api_key = Some(arg.to_string());
            success("API key set for this session.");
        }
    }

    fn set_image(&mut self, arg: &str) -> AppResult<()> {
        if arg.is_empty() {
            return Err(AppError::MissingImage);
        }
        // a bad upload is an input problem, not a storage failure
        let img = ProductImage::open(Path::new(arg)).map_err(|e| match e {
            AppError::Io(io) => AppError::UnsupportedImage(format!("{arg}: {io}")),
            other => other,
        })?;
        success(format!(
            "預覽: {} ({}, {} bytes)",
            img.file_name,
            img.mime(),
            img.bytes.len()
        ));
        self.image = Some(img);
        Ok(())
    }

    fn set_name(&mut self, arg: &str) {
        self.product_name = arg.to_string();
        info(format!("📦 商品名稱: {}", self.product_name));
    }

    fn set_style(&mut self, arg: &str) -> AppResult<()> {
        if arg.is_empty() {
            for st in Style::ALL {
                let mark = if st == self.style { "*" } else { " " };
                println!(" {mark} {}. {} ({})", st.number(), st, st.alias());
            }
            return Ok(());
        }
        self.style = Style::from_input(arg).ok_or_else(|| AppError::InvalidStyle(arg.to_string()))?;
        info(format!("🎨 文案風格: {}", self.style));
        Ok(())
    }

    fn generate(&mut self) -> AppResult<()> {
        let generator = build_generator(
            self.cfg,
            self.api_key.as_deref(),
            None,
            self.api_base.as_deref(),
        )?;

        if generator.is_some() && self.image.is_some() {
            busy(format!("AI 寫作中... ({})", self.style));
        }

        let record = self.flow.run(
            &self.store,
            &mut self.buffer,
            generator.as_ref(),
            GenerateInput {
                image: self.image.as_ref(),
                product_name: &self.product_name,
                style: self.style,
            },
        )?;

        success("已生成並存檔！");
        self.selected = Some(record.timestamp.clone());
        self.show();
        Ok(())
    }

    fn render_history(&self) -> AppResult<()> {
        let records = self.store.load()?;
        if records.is_empty() {
            info("目前尚無紀錄");
            return Ok(());
        }

        let sep = &self.cfg.label_separator;
        let current = self.current_selection(&records);
        header("📜 歷史紀錄");
        for (i, r) in recent_first(&records).enumerate() {
            let mark = if current.is_some_and(|c| c.timestamp == r.timestamp) {
                "▶"
            } else {
                " "
            };
            println!(
                "{mark} {:>3}  {}  {}  {}",
                format!("#{}", i + 1),
                r.label(sep),
                style_colour(&r.style).paint(r.style.as_str()),
                preview(&r.content, 30),
            );
        }
        Ok(())
    }

    /// Explicit selection if still present, else the most recent post.
    fn current_selection<'r>(&self, records: &'r [PostRecord]) -> Option<&'r PostRecord> {
        self.selected
            .as_ref()
            .and_then(|ts| records.iter().find(|r| &r.timestamp == ts))
            .or_else(|| recent_first(records).next())
    }

    /// Resolve `arg`, or the current selection when `arg` is empty.
    fn pick(&self, records: &[PostRecord], arg: &str) -> AppResult<PostRecord> {
        if arg.is_empty() {
            return self
                .current_selection(records)
                .cloned()
                .ok_or_else(|| AppError::RecordNotFound("目前尚無紀錄".into()));
        }
        Selection::parse(arg, &self.cfg.label_separator)?
            .resolve(records)
            .cloned()
    }

    fn select(&mut self, arg: &str) -> AppResult<()> {
        let records = self.store.load()?;
        let record = self.pick(&records, arg)?;
        info(format!("Selected {}", record.label(&self.cfg.label_separator)));
        self.selected = Some(record.timestamp);
        Ok(())
    }

    fn load(&mut self, arg: &str) -> AppResult<()> {
        let records = self.store.load()?;
        let record = self.pick(&records, arg)?;

        self.buffer.on_load(&record);
        self.selected = Some(record.timestamp.clone());
        info(format!("已讀取：{}", record.product_name));
        print_post(&record, &self.cfg.label_separator);
        Ok(())
    }

    fn delete(&mut self, arg: &str) -> AppResult<()> {
        let records = self.store.load()?;
        let record = self.pick(&records, arg)?;

        self.store.delete(&record.timestamp)?;
        self.buffer.on_delete(&record.timestamp);
        if self.selected.as_deref() == Some(record.timestamp.as_str()) {
            self.selected = None;
        }

        success("已刪除該筆紀錄！");
        self.render_history()
    }

    fn show(&self) {
        header("👇 文案編輯區");
        if self.buffer.content().is_empty() {
            println!("(empty)");
        } else {
            println!("{}", self.buffer.content());
        }
        println!();
        if !self.buffer.can_save() {
            hint("提示：先 `load` 舊文案後，才能 `save` 儲存修改。");
        }
    }

    fn save(&mut self) -> AppResult<()> {
        match self.buffer.save_edit(&self.store)? {
            0 => warning("The loaded post no longer exists; nothing was saved."),
            _ => success("修改已儲存！"),
        }
        Ok(())
    }
}
