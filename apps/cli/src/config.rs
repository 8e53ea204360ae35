//! Data directory resolution and `config.toml` settings.

use crate::content::ContentStore;
use crate::store::CsvIndexStore;
use askme_core::{CoreError, ParseMode, SchedulerSettings, Sm2};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const DATA_DIR_NAME: &str = ".askme";
pub const INDEX_FILE: &str = "index.csv";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to determine the current user's home directory")]
    NoHome,

    #[error("unable to create the askme data directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid settings in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid settings in {path:?}: {source}")]
    Invalid { path: PathBuf, source: CoreError },
}

/// Settings read from `config.toml`; every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub parse_mode: ParseMode,
    /// Hold `index.lock` while a session runs.
    pub lock: bool,
    pub scheduler: SchedulerSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            parse_mode: ParseMode::default(),
            lock: true,
            scheduler: SchedulerSettings::default(),
        }
    }
}

impl Settings {
    /// Read settings from `path`, falling back to defaults when the file is absent.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let settings: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings
            .scheduler
            .validate()
            .map_err(|source| ConfigError::Invalid {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(settings)
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub settings: Settings,
}

impl AppConfig {
    /// Resolve the data directory, create it, and apply command line overrides.
    pub fn load(data_dir: Option<PathBuf>, strict: bool) -> Result<Self, ConfigError> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => dirs::home_dir()
                .ok_or(ConfigError::NoHome)?
                .join(DATA_DIR_NAME),
        };

        fs::create_dir_all(&data_dir).map_err(|source| ConfigError::CreateDir {
            path: data_dir.clone(),
            source,
        })?;

        let mut settings = Settings::read(&data_dir.join(CONFIG_FILE))?;
        if strict {
            settings.parse_mode = ParseMode::Strict;
        }

        debug!(data_dir = %data_dir.display(), ?settings, "configuration loaded");
        Ok(Self { data_dir, settings })
    }

    pub fn index_path(&self) -> PathBuf {
        self.data_dir.join(INDEX_FILE)
    }

    pub fn index_store(&self) -> CsvIndexStore {
        CsvIndexStore::new(self.index_path(), self.settings.parse_mode)
    }

    pub fn content_store(&self) -> ContentStore {
        ContentStore::new(&self.data_dir)
    }

    pub fn algorithm(&self) -> Sm2 {
        Sm2::from_settings(&self.settings.scheduler)
    }
}
