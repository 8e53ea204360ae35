//! Spaced repetition scheduling.

pub mod sm2;

use crate::types::{ItemRecord, Quality};
use chrono::{DateTime, Utc};

pub use sm2::Sm2;

/// Result of scheduling an item after review.
#[derive(Debug, Clone)]
pub struct SchedulingResult {
    pub record: ItemRecord,
    pub next_due: DateTime<Utc>,
}

/// Trait for spaced repetition algorithms.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Calculate the next scheduling state after a review.
    ///
    /// Pure: the input record is left untouched and `now` is supplied by the caller.
    fn schedule(&self, record: &ItemRecord, quality: Quality, now: DateTime<Utc>)
        -> SchedulingResult;

    /// Initial state for a newly authored item.
    fn initial_record(&self, identifier: &str) -> ItemRecord;
}
