//! Core spaced-repetition library used by the askme CLI.
//!
//! Provides:
//! - SM-2 scheduling of item records
//! - Due-item selection with tag filtering
//! - Tag marker parsing for item content
//! - The identifier-keyed item collection and shared types

pub mod algorithm;
pub mod error;
pub mod index;
pub mod parser;
pub mod selector;
pub mod types;

pub use algorithm::{SchedulingResult, Sm2, SpacedRepetitionAlgorithm};
pub use error::{CoreError, Result};
pub use index::ItemIndex;
pub use parser::{parse_tags, TAGS_MARKER};
pub use selector::select_next;
pub use types::{
    EasinessUpdate, IntervalUnit, ItemRecord, ParseMode, Quality, SchedulerSettings,
};
