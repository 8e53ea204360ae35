//! Application error type.

use crate::config::ConfigError;
use crate::content::ContentError;
use crate::prompt::PromptError;
use crate::store::StoreError;
use askme_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("invalid item name {0:?}: names must be plain file names")]
    InvalidName(String),

    #[error("editor {command:?} failed: {reason}")]
    Editor { command: String, reason: String },

    #[error("output failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to encode listing: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
