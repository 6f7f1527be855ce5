//! Unified application error type.
//! All modules (store, core, client, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / storage
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("History file error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Generation
    // ---------------------------
    #[error("無 API Key: set OPENAI_API_KEY, pass --api-key or add api_key to the config")]
    MissingCredential,

    #[error("No product image selected")]
    MissingImage,

    #[error("Unsupported image '{0}': use a .jpg, .jpeg or .png file")]
    UnsupportedImage(String),

    #[error("錯誤：{0}")]
    Generation(String),

    // ---------------------------
    // Selection / input errors
    // ---------------------------
    #[error("Invalid style: {0}")]
    InvalidStyle(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("No record found for {0}")]
    RecordNotFound(String),

    #[error("Nothing to save: load a post from the history first")]
    NotBound,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl From<serde_yaml::Error> for AppError {
    fn from(e: serde_yaml::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Generation(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
