//! Command implementations behind the CLI.

pub mod add;
pub mod list;
pub mod recover;
pub mod review;

use crate::config::AppConfig;
use crate::error::Result;
use crate::store::IndexLock;
use std::io::{BufRead, Write};

/// Terminal handles a command talks to.
pub struct Console<'a> {
    pub input: &'a mut dyn BufRead,
    pub output: &'a mut dyn Write,
    pub use_color: bool,
}

/// Open the session lock when enabled in the settings.
///
/// Callers hold the guard from `IndexLock::try_acquire` until after the save.
fn open_lock(config: &AppConfig) -> Result<Option<IndexLock>> {
    if !config.settings.lock {
        return Ok(None);
    }
    Ok(Some(IndexLock::open(&config.data_dir)?))
}
