pub mod file;
pub mod history;

pub use history::HistoryStore;
