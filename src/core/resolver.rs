//! Maps what the user picked in the history list back to a record.
//!
//! History labels are `timestamp + separator + product_name`. The timestamp
//! never contains the separator, so splitting on its first occurrence is
//! enough even when the product name contains it.

use crate::errors::{AppError, AppResult};
use crate::models::PostRecord;
use crate::models::record::parse_stamp;

/// Left side of the first `sep` in `label`, or the whole label.
pub fn extract_timestamp<'a>(label: &'a str, sep: &str) -> &'a str {
    if sep.is_empty() {
        return label.trim();
    }
    match label.split_once(sep) {
        Some((stamp, _)) => stamp.trim(),
        None => label.trim(),
    }
}

/// History entries, most recent first.
pub fn recent_first(records: &[PostRecord]) -> impl Iterator<Item = &PostRecord> {
    records.iter().rev()
}

/// Labels for the history selector, most recent first.
pub fn history_labels(records: &[PostRecord], sep: &str) -> Vec<String> {
    recent_first(records).map(|r| r.label(sep)).collect()
}

/// A history selection as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// 1-based position in the most-recent-first list (`3` or `#3`).
    Position(usize),
    /// A label or bare timestamp.
    Key(String),
}

impl Selection {
    pub fn parse(input: &str, sep: &str) -> AppResult<Self> {
        let s = input.trim();
        if s.is_empty() {
            return Err(AppError::InvalidSelection("empty selection".into()));
        }

        let digits = s.strip_prefix('#').unwrap_or(s);
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            let n: usize = digits
                .parse()
                .map_err(|_| AppError::InvalidSelection(s.to_string()))?;
            if n == 0 {
                return Err(AppError::InvalidSelection(
                    "positions start at 1".to_string(),
                ));
            }
            return Ok(Selection::Position(n));
        }

        Ok(Selection::Key(extract_timestamp(s, sep).to_string()))
    }

    /// Record key this selection targets. A position must exist in
    /// `records`; a well-formed timestamp is taken as is, present or not.
    pub fn timestamp(&self, records: &[PostRecord]) -> AppResult<String> {
        match self {
            Selection::Position(_) => Ok(self.resolve(records)?.timestamp.clone()),
            Selection::Key(stamp) if parse_stamp(stamp).is_some() => Ok(stamp.clone()),
            Selection::Key(_) => Ok(self.resolve(records)?.timestamp.clone()),
        }
    }

    /// Pick the record this selection refers to.
    pub fn resolve<'r>(&self, records: &'r [PostRecord]) -> AppResult<&'r PostRecord> {
        match self {
            Selection::Position(n) => recent_first(records)
                .nth(n - 1)
                .ok_or_else(|| AppError::RecordNotFound(format!("position #{n}"))),
            Selection::Key(stamp) => records
                .iter()
                .find(|r| &r.timestamp == stamp)
                .ok_or_else(|| AppError::RecordNotFound(stamp.clone())),
        }
    }
}

/// Parse `input` and resolve it against `records` in one go.
pub fn resolve<'r>(records: &'r [PostRecord], input: &str, sep: &str) -> AppResult<&'r PostRecord> {
    Selection::parse(input, sep)?.resolve(records)
}
