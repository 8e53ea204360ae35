//! Advisory lock held for the whole load-to-save window of a session.

use crate::store::error::StoreError;
use fd_lock::{RwLock, RwLockWriteGuard};
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

type Result<T> = std::result::Result<T, StoreError>;

pub const LOCK_FILE: &str = "index.lock";

/// Exclusive `flock`-style lock on `index.lock` in the data directory.
pub struct IndexLock {
    lock: RwLock<File>,
    path: PathBuf,
}

impl std::fmt::Debug for IndexLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexLock").field("path", &self.path).finish()
    }
}

impl IndexLock {
    pub fn open(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| StoreError::Io {
                action: "open lock file",
                path: path.clone(),
                source,
            })?;
        Ok(Self {
            lock: RwLock::new(file),
            path,
        })
    }

    /// Take the lock without waiting; another live session yields `StoreError::Busy`.
    pub fn try_acquire(&mut self) -> Result<RwLockWriteGuard<'_, File>> {
        match self.lock.try_write() {
            Ok(guard) => {
                debug!(path = %self.path.display(), "acquired index lock");
                Ok(guard)
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock => Err(StoreError::Busy(self.path.clone())),
            Err(source) => Err(StoreError::Io {
                action: "lock index",
                path: self.path.clone(),
                source,
            }),
        }
    }
}
