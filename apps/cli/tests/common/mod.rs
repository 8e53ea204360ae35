//! Common test utilities for the askme integration tests.
//!
//! Every test gets its own temporary data directory; the clock is fixed so
//! due times can be asserted exactly.

#![allow(dead_code)]

pub mod fixtures;

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::TempDir;

use askme_cli::commands::review::{self, ReviewOutcome};
use askme_cli::commands::Console;
use askme_cli::config::AppConfig;
use askme_cli::store::IndexRepository;
use askme_cli::Result;
use askme_core::{ItemIndex, ItemRecord};

/// Isolated data directory plus the configuration pointing at it.
pub struct TestContext {
    _dir: TempDir,
    pub config: AppConfig,
}

impl TestContext {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp data dir");
        let config = AppConfig::load(Some(dir.path().to_path_buf()), false).expect("load config");
        Self { _dir: dir, config }
    }

    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    pub fn index_path(&self) -> PathBuf {
        self.config.index_path()
    }

    pub fn backup_path(&self) -> PathBuf {
        self.config.index_store().backup_path()
    }

    pub fn write_item(&self, identifier: &str, content: &str) {
        fs::write(self.data_dir().join(identifier), content).expect("write item");
    }

    /// Save `records` as the index and create a content file for each.
    pub fn seed(&self, records: Vec<ItemRecord>) {
        for record in &records {
            let tags: Vec<&str> = record.tags.iter().map(String::as_str).collect();
            self.write_item(
                &record.identifier,
                &fixtures::item_content(&record.identifier, &tags),
            );
        }
        let index = ItemIndex::from_records(records).expect("unique identifiers");
        self.config.index_store().save(&index).expect("seed index");
    }

    pub fn load_index(&self) -> ItemIndex {
        self.config.index_store().load().expect("load index")
    }

    pub fn index_text(&self) -> String {
        fs::read_to_string(self.index_path()).expect("read index")
    }

    /// Run a review session with scripted input; returns the outcome and everything printed.
    pub fn review(&self, tags: &[&str], input: &str, now: DateTime<Utc>) -> (Result<ReviewOutcome>, String) {
        let tags: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
        let mut input = Cursor::new(input.to_string());
        let mut output = Vec::new();
        let outcome = {
            let mut console = Console {
                input: &mut input,
                output: &mut output,
                use_color: false,
            };
            review::run(&self.config, &tags, &mut console, &|| now)
        };
        (outcome, String::from_utf8(output).expect("utf-8 output"))
    }
}
