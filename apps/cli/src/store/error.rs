//! Index store error types.

use askme_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unable to create the data directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to read the index file {path:?}: {source}")]
    Read { path: PathBuf, source: csv::Error },

    #[error("unable to write the index file {path:?}: {source}")]
    Write { path: PathBuf, source: csv::Error },

    #[error("{action} failed for {path:?}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("index row {row} has {fields} fields, expected 5")]
    MalformedRow { row: usize, fields: usize },

    #[error("index row {row}: invalid {field} {value:?}")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("index row {row}: {source}")]
    Duplicate { row: usize, source: CoreError },

    #[error(
        "the index {path:?} is missing but its backup {backup:?} exists; \
         a previous save was interrupted, run `askme recover` to restore it{}",
        staged_note(.staging)
    )]
    InterruptedSave {
        path: PathBuf,
        backup: PathBuf,
        /// Unconfirmed newer generation left by the interrupted save.
        staging: Option<PathBuf>,
    },

    #[error("nothing to recover: {0}")]
    NothingToRecover(String),

    #[error("another askme session is using {0:?}")]
    Busy(PathBuf),
}

fn staged_note(staging: &Option<PathBuf>) -> String {
    match staging {
        Some(path) => format!(
            " ({path:?} holds the newer, unconfirmed index and can be inspected by hand)"
        ),
        None => String::new(),
    }
}
