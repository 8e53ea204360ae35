//! Restore the index after a save was interrupted between its renames.

use super::{open_lock, Console};
use crate::config::AppConfig;
use crate::error::Result;
use std::io::Write;

pub fn run(config: &AppConfig, console: &mut Console<'_>) -> Result<()> {
    let mut lock = open_lock(config)?;
    let _guard = lock.as_mut().map(|l| l.try_acquire()).transpose()?;

    let store = config.index_store();
    store.recover()?;
    writeln!(
        console.output,
        "Restored {} from {}.",
        store.path().display(),
        store.backup_path().display()
    )?;
    if let Some(staging) = store.leftover_staging() {
        writeln!(
            console.output,
            "{} holds a newer, unconfirmed index from the interrupted save; \
             it was left in place for inspection.",
            staging.display()
        )?;
    }
    Ok(())
}
