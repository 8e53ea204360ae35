//! CSV-backed index repository.
//!
//! One row per item, no header:
//! `identifier,repetitions,easiness,interval,due`

use crate::store::error::StoreError;
use askme_core::{ItemIndex, ItemRecord, ParseMode};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

type Result<T> = std::result::Result<T, StoreError>;

/// Number of fields in an index row.
const FIELDS: usize = 5;

/// Written for records that were never scheduled.
pub const ZERO_TIME: &str = "0001-01-01T00:00:00Z";

/// Unix timestamp of [`ZERO_TIME`].
const ZERO_TIME_UNIX: i64 = -62_135_596_800;

/// Persistence for the item index.
pub trait IndexRepository {
    fn load(&self) -> Result<ItemIndex>;
    fn save(&self, index: &ItemIndex) -> Result<()>;
}

/// Index stored as a CSV file, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct CsvIndexStore {
    path: PathBuf,
    parse_mode: ParseMode,
}

impl CsvIndexStore {
    pub fn new(path: impl Into<PathBuf>, parse_mode: ParseMode) -> Self {
        Self {
            path: path.into(),
            parse_mode,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Previous generation, kept after every save.
    pub fn backup_path(&self) -> PathBuf {
        sibling(&self.path, ".old")
    }

    /// Next generation, written in full before it replaces the live index.
    pub fn staging_path(&self) -> PathBuf {
        sibling(&self.path, ".new")
    }

    /// Staging file left behind by an interrupted save, if any.
    pub fn leftover_staging(&self) -> Option<PathBuf> {
        let staging = self.staging_path();
        staging.is_file().then_some(staging)
    }

    /// Restore the backup after a save was interrupted between its two renames.
    ///
    /// A leftover staging file is kept untouched for manual inspection.
    pub fn recover(&self) -> Result<()> {
        if self.path.exists() {
            return Err(StoreError::NothingToRecover(format!(
                "{} is present",
                self.path.display()
            )));
        }
        let backup = self.backup_path();
        if !backup.exists() {
            return Err(StoreError::NothingToRecover(format!(
                "no backup at {}",
                backup.display()
            )));
        }
        fs::rename(&backup, &self.path).map_err(|source| StoreError::Io {
            action: "restore backup",
            path: backup.clone(),
            source,
        })?;
        info!(path = %self.path.display(), "restored index from backup");
        if let Some(staging) = self.leftover_staging() {
            warn!(staging = %staging.display(), "newer unconfirmed index left in place");
        }
        Ok(())
    }

    fn parse_row(&self, row: &csv::StringRecord, row_num: usize) -> Result<ItemRecord> {
        if row.len() != FIELDS {
            return Err(StoreError::MalformedRow {
                row: row_num,
                fields: row.len(),
            });
        }

        let identifier = row[0].to_string();
        if identifier.trim().is_empty() {
            return Err(StoreError::InvalidField {
                row: row_num,
                field: "identifier",
                value: identifier,
            });
        }

        Ok(ItemRecord {
            repetitions: self.field(parse_repetitions(&row[1]), row_num, "repetitions", &row[1])?,
            easiness: self.field(parse_decimal(&row[2]), row_num, "easiness", &row[2])?,
            interval: self.field(parse_decimal(&row[3]), row_num, "interval", &row[3])?,
            due: self.field(parse_due(&row[4]), row_num, "due", &row[4])?,
            ..ItemRecord::new(identifier, 0.0)
        })
    }

    /// Apply the parse mode to a field that may have failed to parse.
    fn field<T: Default>(
        &self,
        parsed: Option<T>,
        row: usize,
        field: &'static str,
        raw: &str,
    ) -> Result<T> {
        match (parsed, self.parse_mode) {
            (Some(value), _) => Ok(value),
            (None, ParseMode::Strict) => Err(StoreError::InvalidField {
                row,
                field,
                value: raw.to_string(),
            }),
            (None, ParseMode::Lenient) => {
                warn!(row, field, value = raw, "unparsable index field, using zero value");
                Ok(T::default())
            }
        }
    }

    fn add_record(&self, index: &mut ItemIndex, record: ItemRecord, row: usize) -> Result<()> {
        if !index.contains(&record.identifier) {
            return index
                .insert(record)
                .map_err(|source| StoreError::Duplicate { row, source });
        }
        match self.parse_mode {
            ParseMode::Strict => Err(StoreError::Duplicate {
                row,
                source: askme_core::CoreError::DuplicateIdentifier(record.identifier),
            }),
            ParseMode::Lenient => {
                warn!(row, identifier = %record.identifier, "duplicate index row replaces earlier one");
                index
                    .update(record)
                    .map_err(|source| StoreError::Duplicate { row, source })
            }
        }
    }

    fn write_staging(&self, staging: &Path, index: &ItemIndex) -> Result<()> {
        let file = File::create(staging).map_err(|source| StoreError::Io {
            action: "create new index",
            path: staging.to_path_buf(),
            source,
        })?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        for record in index.records() {
            writer
                .write_record([
                    record.identifier.clone(),
                    record.repetitions.to_string(),
                    format!("{:.6}", record.easiness),
                    format!("{:.6}", record.interval),
                    format_due(record.due),
                ])
                .map_err(|source| StoreError::Write {
                    path: staging.to_path_buf(),
                    source,
                })?;
        }

        let file = writer.into_inner().map_err(|e| StoreError::Io {
            action: "flush new index",
            path: staging.to_path_buf(),
            source: e.into_error(),
        })?;
        file.sync_all().map_err(|source| StoreError::Io {
            action: "sync new index",
            path: staging.to_path_buf(),
            source,
        })
    }
}

impl IndexRepository for CsvIndexStore {
    fn load(&self) -> Result<ItemIndex> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let backup = self.backup_path();
                if backup.exists() {
                    return Err(StoreError::InterruptedSave {
                        path: self.path.clone(),
                        backup,
                        staging: self.leftover_staging(),
                    });
                }
                debug!(path = %self.path.display(), "no index yet, starting empty");
                return Ok(ItemIndex::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    action: "open index",
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut index = ItemIndex::new();
        for (i, row) in reader.records().enumerate() {
            let row = row.map_err(|source| StoreError::Read {
                path: self.path.clone(),
                source,
            })?;
            let row_num = i + 1;
            let record = self.parse_row(&row, row_num)?;
            self.add_record(&mut index, record, row_num)?;
        }

        debug!(path = %self.path.display(), records = index.len(), "loaded index");
        Ok(index)
    }

    fn save(&self, index: &ItemIndex) -> Result<()> {
        let staging = self.staging_path();
        let backup = self.backup_path();

        self.write_staging(&staging, index)?;

        match fs::remove_file(&backup) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(source) => {
                return Err(StoreError::Io {
                    action: "remove old backup",
                    path: backup,
                    source,
                })
            }
        }

        match fs::rename(&self.path, &backup) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "first save, no generation to back up");
            }
            Err(source) => {
                return Err(StoreError::Io {
                    action: "back up current index",
                    path: self.path.clone(),
                    source,
                })
            }
        }

        // Commit point.
        fs::rename(&staging, &self.path).map_err(|source| StoreError::Io {
            action: "install new index",
            path: staging.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), records = index.len(), "saved index");
        Ok(())
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Older indexes wrote repetitions as `2.000000`.
fn parse_repetitions(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u32>() {
        return Some(n);
    }
    let value = raw.parse::<f64>().ok()?;
    let integral = value.is_finite() && value >= 0.0 && value.fract() == 0.0;
    (integral && value <= f64::from(u32::MAX)).then_some(value as u32)
}

fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `Some(None)` for a blank or zero timestamp, `None` when unparsable.
fn parse_due(raw: &str) -> Option<Option<DateTime<Utc>>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(None);
    }
    let due = DateTime::parse_from_rfc3339(raw).ok()?.with_timezone(&Utc);
    Some((due.timestamp() != ZERO_TIME_UNIX).then_some(due))
}

fn format_due(due: Option<DateTime<Utc>>) -> String {
    match due {
        Some(due) => due.to_rfc3339_opts(SecondsFormat::Secs, true),
        None => ZERO_TIME.to_string(),
    }
}
