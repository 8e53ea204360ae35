//! Item content files and the tags they declare.

use askme_core::{parse_tags, ItemIndex};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("unable to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("item file {0:?} already exists")]
    Exists(PathBuf),
}

type Result<T> = std::result::Result<T, ContentError>;

/// Item files live directly in the data directory, named by identifier.
#[derive(Debug, Clone)]
pub struct ContentStore {
    data_dir: PathBuf,
}

impl ContentStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, identifier: &str) -> PathBuf {
        self.data_dir.join(identifier)
    }

    pub fn read(&self, identifier: &str) -> Result<String> {
        let path = self.path_for(identifier);
        let bytes = fs::read(&path).map_err(|source| ContentError::Read { path, source })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Fill in the tags of every record from its content file.
    ///
    /// Any unreadable file aborts the whole load.
    pub fn load_tags(&self, index: &mut ItemIndex) -> Result<()> {
        for record in index.records_mut() {
            let content = self.read(&record.identifier)?;
            record.tags = parse_tags(&content);
        }
        debug!(records = index.len(), "loaded tags");
        Ok(())
    }

    /// Write a new item file, refusing to overwrite an existing one.
    pub fn create(&self, identifier: &str, content: &str) -> Result<PathBuf> {
        let path = self.path_for(identifier);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Err(ContentError::Exists(path)),
            Err(source) => return Err(ContentError::Write { path, source }),
        };
        file.write_all(content.as_bytes())
            .map_err(|source| ContentError::Write {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }

    pub fn remove(&self, identifier: &str) -> Result<()> {
        let path = self.path_for(identifier);
        fs::remove_file(&path).map_err(|source| ContentError::Write { path, source })
    }
}
