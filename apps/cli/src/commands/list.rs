//! Read-only listing of the index.

use super::Console;
use crate::config::AppConfig;
use crate::error::Result;
use crate::store::IndexRepository;
use askme_core::ItemRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;

/// One row of `askme list`.
#[derive(Debug, Serialize)]
pub struct ListEntry {
    pub identifier: String,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    pub repetitions: u32,
    pub easiness: f64,
    pub interval: f64,
    pub due: Option<DateTime<Utc>>,
    pub due_now: bool,
}

impl ListEntry {
    fn new(record: &ItemRecord, now: DateTime<Utc>) -> Self {
        Self {
            identifier: record.identifier.clone(),
            tags: record.tags.clone(),
            repetitions: record.repetitions,
            easiness: record.easiness,
            interval: record.interval,
            due: record.due,
            due_now: record.is_due(now),
        }
    }
}

/// Collect entries in index order, optionally restricted to items with all `tags`.
pub fn entries(config: &AppConfig, tags: &[String], now: DateTime<Utc>) -> Result<Vec<ListEntry>> {
    let mut index = config.index_store().load()?;
    if !tags.is_empty() {
        config.content_store().load_tags(&mut index)?;
    }

    Ok(index
        .records()
        .iter()
        .filter(|r| r.has_tags(tags))
        .map(|r| ListEntry::new(r, now))
        .collect())
}

pub fn run(
    config: &AppConfig,
    tags: &[String],
    json: bool,
    console: &mut Console<'_>,
    now: DateTime<Utc>,
) -> Result<()> {
    let entries = entries(config, tags, now)?;

    if json {
        serde_json::to_writer_pretty(&mut *console.output, &entries)?;
        writeln!(console.output)?;
        return Ok(());
    }

    if entries.is_empty() {
        writeln!(console.output, "No items.")?;
        return Ok(());
    }

    let width = entries
        .iter()
        .map(|e| e.identifier.chars().count())
        .max()
        .unwrap_or(0);
    for entry in &entries {
        let marker = if entry.due_now { "*" } else { " " };
        let due = entry
            .due
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());
        writeln!(
            console.output,
            "{marker} {:<width$}  n={:<3} ef={:<5.2} i={:<6} due={due}",
            entry.identifier, entry.repetitions, entry.easiness, entry.interval,
        )?;
    }
    let due_count = entries.iter().filter(|e| e.due_now).count();
    writeln!(console.output, "{} items, {due_count} due", entries.len())?;
    Ok(())
}
