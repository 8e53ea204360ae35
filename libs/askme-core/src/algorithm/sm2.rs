//! SM-2 spaced repetition algorithm.
//!
//! Based on SuperMemo 2. The easiness update defaults to the multiplicative
//! form that existing indexes were scheduled with; the published additive
//! form is available through [`EasinessUpdate::Additive`].

use super::{SchedulingResult, SpacedRepetitionAlgorithm};
use crate::types::{
    EasinessUpdate, IntervalUnit, ItemRecord, Quality, SchedulerSettings, EASINESS_FLOOR,
};
use chrono::{DateTime, TimeZone, Utc};

/// `9999-12-31T23:59:59Z`, the latest due time the index format can hold.
const LATEST_DUE_SECS: i64 = 253_402_300_799;

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_easiness: f64,
    pub minimum_easiness: f64,
    pub easiness_update: EasinessUpdate,
    pub interval_unit: IntervalUnit,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self::from_settings(&SchedulerSettings::default())
    }
}

impl Sm2 {
    pub fn from_settings(settings: &SchedulerSettings) -> Self {
        Self {
            initial_easiness: settings.initial_easiness,
            minimum_easiness: settings.minimum_easiness,
            easiness_update: settings.easiness_update,
            interval_unit: settings.interval_unit,
        }
    }

    fn next_interval(record: &ItemRecord) -> f64 {
        match record.repetitions {
            0 => 1.0,
            1 => 6.0,
            _ => (record.interval * record.easiness).ceil().min(f64::MAX),
        }
    }

    fn next_easiness(&self, easiness: f64, quality: Quality) -> f64 {
        let miss = f64::from(Quality::MAX - quality.value());
        let delta = 0.1 - miss * (0.08 + miss * 0.02);
        let updated = match self.easiness_update {
            EasinessUpdate::Multiplicative => easiness * delta,
            EasinessUpdate::Additive => easiness + delta,
        };
        updated.max(self.minimum_easiness.max(EASINESS_FLOOR))
    }

    /// Due time `interval` units after `now`, capped at the latest storable time.
    fn due_after(&self, now: DateTime<Utc>, interval: f64) -> DateTime<Utc> {
        let latest = Utc
            .timestamp_opt(LATEST_DUE_SECS, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.interval_unit
            .to_duration(interval)
            .and_then(|delta| now.checked_add_signed(delta))
            .map_or(latest, |due| due.min(latest))
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn initial_record(&self, identifier: &str) -> ItemRecord {
        ItemRecord::new(identifier, self.initial_easiness)
    }

    fn schedule(&self, record: &ItemRecord, quality: Quality, now: DateTime<Utc>) -> SchedulingResult {
        let mut next = record.clone();

        if quality.is_successful() {
            next.interval = Self::next_interval(record);
            next.easiness = self.next_easiness(record.easiness, quality);
            next.repetitions = record.repetitions.saturating_add(1);
        } else {
            // Lapse: start the repetition sequence over, easiness untouched
            next.repetitions = 0;
            next.interval = 1.0;
        }

        let next_due = self.due_after(now, next.interval);
        next.due = Some(next_due);

        SchedulingResult {
            record: next,
            next_due,
        }
    }
}
