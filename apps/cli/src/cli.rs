//! Command line definition.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "askme",
    about = "Spaced-repetition flashcard reviews",
    long_about = "Reviews the item that is due next. Free arguments are tags: only items \
                  declaring all of them are considered.",
    version
)]
pub struct Cli {
    /// Directory holding index.csv and the item files (default: ~/.askme)
    #[arg(long, global = true, env = "ASKME_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Fail on unparsable index fields instead of zeroing them
    #[arg(long, global = true)]
    pub strict: bool,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// Review only items carrying all of these tags
    pub tags: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Review one due item (the default)
    Review {
        /// Required tags
        tags: Vec<String>,
    },

    /// Write a new item in $EDITOR and add it to the index
    Add {
        /// File name for the item (default: a random id)
        #[arg(long)]
        name: Option<String>,
    },

    /// List indexed items and when they are due
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Required tags
        tags: Vec<String>,
    },

    /// Restore the backup index after an interrupted save
    Recover,
}
