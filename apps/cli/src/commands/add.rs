//! Author a new item in the user's editor and add it to the index.

use super::{open_lock, Console};
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::store::IndexRepository;
use askme_core::{CoreError, SpacedRepetitionAlgorithm};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};
use uuid::Uuid;

/// Initial content of a new item file.
pub const TEMPLATE: &str = "Tags: \n\n# Question\n\nAnswer\n";

/// Opens an item file for editing and returns once the user is done.
pub trait Editor {
    fn edit(&self, path: &Path) -> Result<()>;
}

/// Editor taken from `$VISUAL` or `$EDITOR`, falling back to `vi`.
#[derive(Debug, Clone)]
pub struct SystemEditor {
    command: String,
}

impl SystemEditor {
    pub fn from_env() -> Self {
        let command = std::env::var("VISUAL")
            .or_else(|_| std::env::var("EDITOR"))
            .ok()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| "vi".to_string());
        Self { command }
    }
}

impl Editor for SystemEditor {
    fn edit(&self, path: &Path) -> Result<()> {
        let mut words = self.command.split_whitespace();
        let program = words.next().unwrap_or("vi");
        debug!(command = %self.command, path = %path.display(), "launching editor");

        let status = Command::new(program)
            .args(words)
            .arg(path)
            .status()
            .map_err(|e| AppError::Editor {
                command: self.command.clone(),
                reason: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(AppError::Editor {
                command: self.command.clone(),
                reason: status.to_string(),
            })
        }
    }
}

/// How an add ended.
#[derive(Debug, PartialEq)]
pub enum AddOutcome {
    Added(String),
    /// The editor left the template empty or untouched.
    Discarded(String),
}

/// Create an item file, let the user write it, then index it.
pub fn run(
    config: &AppConfig,
    name: Option<&str>,
    editor: &dyn Editor,
    console: &mut Console<'_>,
) -> Result<AddOutcome> {
    let identifier = match name {
        Some(name) => item_identifier(name)?,
        None => format!("{}.md", Uuid::new_v4()),
    };

    let mut lock = open_lock(config)?;
    let _guard = lock.as_mut().map(|l| l.try_acquire()).transpose()?;

    let store = config.index_store();
    let content = config.content_store();
    let algorithm = config.algorithm();

    let mut index = store.load()?;
    if index.contains(&identifier) {
        return Err(CoreError::DuplicateIdentifier(identifier).into());
    }

    let path = content.create(&identifier, TEMPLATE)?;
    if let Err(e) = editor.edit(&path) {
        content.remove(&identifier)?;
        return Err(e);
    }

    let written = content.read(&identifier)?;
    if written.trim().is_empty() || written == TEMPLATE {
        content.remove(&identifier)?;
        writeln!(console.output, "Nothing written, {identifier} discarded.")?;
        return Ok(AddOutcome::Discarded(identifier));
    }

    index.insert(algorithm.initial_record(&identifier))?;
    store.save(&index)?;
    info!(identifier = %identifier, items = index.len(), "added item");

    writeln!(console.output, "Added {identifier}.")?;
    Ok(AddOutcome::Added(identifier))
}

/// Turn a user supplied name into a file name inside the data directory.
fn item_identifier(name: &str) -> Result<String> {
    let name = name.trim();
    let plain = !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\'])
        && !name.contains(',');
    if !plain {
        return Err(AppError::InvalidName(name.to_string()));
    }

    if Path::new(name).extension().is_some() {
        Ok(name.to_string())
    } else {
        Ok(format!("{name}.md"))
    }
}
