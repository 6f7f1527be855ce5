//! In-memory edit buffer and its binding to a persisted record.

use crate::errors::{AppError, AppResult};
use crate::models::PostRecord;
use crate::store::HistoryStore;
use tracing::debug;

/// Which record (if any) the buffer is editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Binding {
    /// Fresh or empty content: saving an edit is not possible.
    #[default]
    Unbound,
    /// Content was loaded from the record with this timestamp.
    BoundTo(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionBuffer {
    content: String,
    binding: Binding,
}

impl SessionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    pub fn bound_timestamp(&self) -> Option<&str> {
        match &self.binding {
            Binding::BoundTo(ts) => Some(ts.as_str()),
            Binding::Unbound => None,
        }
    }

    /// Whether "save edit" may be offered.
    pub fn can_save(&self) -> bool {
        matches!(self.binding, Binding::BoundTo(_))
    }

    /// Newly generated copy is always treated as new, never as an edit.
    pub fn on_generated(&mut self, text: &str) {
        self.content = text.to_string();
        self.binding = Binding::Unbound;
    }

    pub fn on_load(&mut self, record: &PostRecord) {
        self.content = record.content.clone();
        self.binding = Binding::BoundTo(record.timestamp.clone());
        debug!(timestamp = %record.timestamp, "buffer bound");
    }

    /// Reset the buffer if the deleted record was the bound one.
    pub fn on_delete(&mut self, timestamp: &str) {
        if self.bound_timestamp() == Some(timestamp) {
            self.content.clear();
            self.binding = Binding::Unbound;
            debug!(timestamp, "buffer cleared after delete");
        }
    }

    /// Live edit of the text; the binding is kept.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.content = text.into();
    }

    /// Write the buffer back to the bound record.
    /// Returns the number of rows updated (0 when the record is gone).
    pub fn save_edit(&self, store: &HistoryStore) -> AppResult<usize> {
        let ts = self.bound_timestamp().ok_or(AppError::NotBound)?;
        store.update(ts, &self.content)
    }
}
