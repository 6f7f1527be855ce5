#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use rcopywriter::models::PostRecord;
use rcopywriter::store::HistoryStore;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const HYPE: &str = "🔥 熱血叫賣風";
pub const BESTIE: &str = "💖 溫柔閨蜜風";

/// Scratch area for one test: config home + history file inside a temp dir.
pub struct Sandbox {
    pub dir: TempDir,
    pub history: String,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let history = dir
            .path()
            .join("history.csv")
            .to_string_lossy()
            .to_string();
        Self { dir, history }
    }

    pub fn home(&self) -> PathBuf {
        self.dir.path().join("home")
    }

    /// Binary with an isolated config home and no ambient API key.
    pub fn rcw(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("rcopywriter");
        cmd.env("RCOPYWRITER_HOME", self.home())
            .env_remove("OPENAI_API_KEY")
            .env_remove("RCOPYWRITER_LOG")
            .args(["--history", &self.history]);
        cmd
    }

    pub fn store(&self) -> HistoryStore {
        HistoryStore::new(&self.history)
    }

    pub fn records(&self) -> Vec<PostRecord> {
        self.store().load().expect("load history")
    }

    /// Two posts: "Older" at 09:00:00 and "Newer" at 10:00:00.
    pub fn seed_two(&self) -> (PostRecord, PostRecord) {
        let day = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let s = self.store();
        let older = s
            .add_at(day.and_hms_opt(9, 0, 0).unwrap(), "Older", HYPE, "old copy")
            .expect("add older");
        let newer = s
            .add_at(day.and_hms_opt(10, 0, 0).unwrap(), "Newer", BESTIE, "new copy")
            .expect("add newer");
        (older, newer)
    }

    /// Small fake JPEG next to the history file.
    pub fn image(&self, name: &str) -> String {
        write_image(self.dir.path(), name)
    }
}

pub fn write_image(dir: &Path, name: &str) -> String {
    let p = dir.join(name);
    fs::write(&p, b"\xFF\xD8\xFF\xE0\x00\x10JFIF\x00").expect("write image");
    p.to_string_lossy().to_string()
}
