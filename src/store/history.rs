//! Record-level operations on the history file.
//!
//! Every mutation reloads the whole table, edits it in memory and rewrites
//! the file. Single user, no locking.

use super::file::{read_table, write_table};
use crate::errors::AppResult;
use crate::models::record::format_stamp;
use crate::models::PostRecord;
use chrono::{Local, NaiveDateTime, TimeDelta};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records in creation order.
    pub fn load(&self) -> AppResult<Vec<PostRecord>> {
        let rows = read_table(&self.path)?;
        debug!(path = %self.path.display(), rows = rows.len(), "history loaded");
        Ok(rows)
    }

    /// Overwrite the file with `records`.
    pub fn save(&self, records: &[PostRecord]) -> AppResult<()> {
        write_table(&self.path, records)?;
        debug!(path = %self.path.display(), rows = records.len(), "history saved");
        Ok(())
    }

    /// Append a new record stamped with the current local time.
    pub fn add(&self, product_name: &str, style: &str, content: &str) -> AppResult<PostRecord> {
        self.add_at(Local::now().naive_local(), product_name, style, content)
    }

    /// Append a new record created at `now`.
    ///
    /// If another record already carries the same second, the stamp is moved
    /// forward until it is free.
    pub fn add_at(
        &self,
        now: NaiveDateTime,
        product_name: &str,
        style: &str,
        content: &str,
    ) -> AppResult<PostRecord> {
        let mut records = self.load()?;

        let mut at = now;
        let mut stamp = format_stamp(&at);
        while records.iter().any(|r| r.timestamp == stamp) {
            at += TimeDelta::seconds(1);
            stamp = format_stamp(&at);
        }

        let record = PostRecord::new(stamp, product_name, style, content);
        records.push(record.clone());
        self.save(&records)?;

        debug!(timestamp = %record.timestamp, "record added");
        Ok(record)
    }

    /// Replace the content of every record stamped `timestamp`.
    /// Returns how many rows changed (0 = no match, file untouched).
    pub fn update(&self, timestamp: &str, new_content: &str) -> AppResult<usize> {
        let mut records = self.load()?;

        let mut touched = 0;
        for r in records.iter_mut().filter(|r| r.timestamp == timestamp) {
            r.content = new_content.to_string();
            touched += 1;
        }

        if touched > 0 {
            self.save(&records)?;
        }
        debug!(timestamp, touched, "record update");
        Ok(touched)
    }

    /// Remove every record stamped `timestamp`.
    /// Returns how many rows were removed (0 = no match, file untouched).
    pub fn delete(&self, timestamp: &str) -> AppResult<usize> {
        let mut records = self.load()?;

        let before = records.len();
        records.retain(|r| r.timestamp != timestamp);
        let removed = before - records.len();

        if removed > 0 {
            self.save(&records)?;
        }
        debug!(timestamp, removed, "record delete");
        Ok(removed)
    }

    /// First record stamped `timestamp`.
    pub fn find(&self, timestamp: &str) -> AppResult<Option<PostRecord>> {
        Ok(self
            .load()?
            .into_iter()
            .find(|r| r.timestamp == timestamp))
    }
}
