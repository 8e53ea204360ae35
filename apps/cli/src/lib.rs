//! The askme command line application.
//!
//! Loads the index, picks the item due next, shows it, records the rating,
//! and saves the rescheduled index atomically.

pub mod cli;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod prompt;
pub mod render;
pub mod store;

use crate::cli::{Cli, Command};
use crate::commands::add::SystemEditor;
use crate::commands::Console;
use crate::config::AppConfig;
use chrono::Utc;
use clap::Parser;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

pub use crate::error::{AppError, Result};

pub fn run() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with the review itself.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .try_init()
        .ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.data_dir.clone(), cli.strict)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let use_color = !cli.no_color && stdout.is_terminal();
    let mut input = stdin.lock();
    let mut output = stdout.lock();
    let mut console = Console {
        input: &mut input,
        output: &mut output,
        use_color,
    };

    match cli.command {
        None => {
            commands::review::run(&config, &cli.tags, &mut console, &Utc::now)?;
        }
        Some(Command::Review { tags }) => {
            commands::review::run(&config, &tags, &mut console, &Utc::now)?;
        }
        Some(Command::Add { name }) => {
            let editor = SystemEditor::from_env();
            commands::add::run(&config, name.as_deref(), &editor, &mut console)?;
        }
        Some(Command::List { json, tags }) => {
            commands::list::run(&config, &tags, json, &mut console, Utc::now())?;
        }
        Some(Command::Recover) => commands::recover::run(&config, &mut console)?,
    }

    Ok(())
}
