//! Core types for the review scheduler.

use crate::error::CoreError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Scheduling state of a single flashcard.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    /// File name of the item content, relative to the data directory.
    pub identifier: String,
    /// Tags declared in the item content. Never stored in the index.
    pub tags: BTreeSet<String>,
    pub repetitions: u32,
    pub easiness: f64,
    pub interval: f64,
    /// `None` means the item has never been scheduled.
    pub due: Option<DateTime<Utc>>,
}

impl ItemRecord {
    /// Create a record for a newly authored item.
    pub fn new(identifier: impl Into<String>, initial_easiness: f64) -> Self {
        Self {
            identifier: identifier.into(),
            tags: BTreeSet::new(),
            repetitions: 0,
            easiness: initial_easiness,
            interval: 0.0,
            due: None,
        }
    }

    /// True when every tag in `filter` is declared by this item.
    pub fn has_tags<S: AsRef<str>>(&self, filter: &[S]) -> bool {
        filter.iter().all(|t| self.tags.contains(t.as_ref()))
    }

    /// True when the item is eligible for review at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due.map_or(true, |due| due < now)
    }
}

/// Rating given by the user after a review, from 1 (hard) to 5 (easy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quality(u8);

impl Quality {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, CoreError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CoreError::InvalidQuality {
                value: value.to_string(),
            })
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Ratings of 3 and above count as a correct recall.
    pub fn is_successful(self) -> bool {
        self.0 >= 3
    }
}

impl FromStr for Quality {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || CoreError::InvalidQuality {
            value: trimmed.to_string(),
        };
        let value: i64 = trimmed.parse().map_err(|_| invalid())?;
        u8::try_from(value)
            .map_err(|_| invalid())
            .and_then(Self::new)
    }
}

/// How the easiness factor changes after a successful recall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasinessUpdate {
    /// `EF * (0.1 - (5-q) * (0.08 + (5-q) * 0.02))`, as stored indexes expect.
    Multiplicative,
    /// Published SM-2: `EF + (0.1 - (5-q) * (0.08 + (5-q) * 0.02))`.
    Additive,
}

impl Default for EasinessUpdate {
    fn default() -> Self {
        Self::Multiplicative
    }
}

// Largest magnitude `Duration::seconds` accepts, in seconds.
const MAX_DURATION_SECS: f64 = (i64::MAX / 1_000) as f64;

/// Time unit used to interpret `ItemRecord::interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalUnit {
    Hours,
    Days,
}

impl Default for IntervalUnit {
    fn default() -> Self {
        Self::Hours
    }
}

impl IntervalUnit {
    /// Convert an interval in this unit to a duration, truncated to whole seconds.
    ///
    /// Returns `None` when the interval is not finite or too long to represent.
    pub fn to_duration(self, interval: f64) -> Option<Duration> {
        let unit_secs = match self {
            Self::Hours => 3_600.0,
            Self::Days => 86_400.0,
        };
        let secs = (interval * unit_secs).trunc();
        if !secs.is_finite() || secs.abs() >= MAX_DURATION_SECS {
            return None;
        }
        Duration::try_seconds(secs as i64)
    }
}

/// Policy for index fields that fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Bad fields fall back to their zero value.
    Lenient,
    /// Bad fields abort the load.
    Strict,
}

impl Default for ParseMode {
    fn default() -> Self {
        Self::Lenient
    }
}

/// Lowest easiness factor SM-2 allows after a successful recall.
pub const EASINESS_FLOOR: f64 = 1.3;

/// Tunables for the SM-2 scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    pub initial_easiness: f64,
    pub minimum_easiness: f64,
    pub easiness_update: EasinessUpdate,
    pub interval_unit: IntervalUnit,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            initial_easiness: 2.5,
            minimum_easiness: EASINESS_FLOOR,
            easiness_update: EasinessUpdate::default(),
            interval_unit: IntervalUnit::default(),
        }
    }
}

impl SchedulerSettings {
    /// Reject tunables that would break the scheduling invariants.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(self.minimum_easiness.is_finite() && self.minimum_easiness >= EASINESS_FLOOR) {
            return Err(CoreError::InvalidSetting {
                name: "minimum_easiness",
                reason: format!(
                    "{} is below the SM-2 floor of {EASINESS_FLOOR}",
                    self.minimum_easiness
                ),
            });
        }
        if !(self.initial_easiness.is_finite() && self.initial_easiness > 0.0) {
            return Err(CoreError::InvalidSetting {
                name: "initial_easiness",
                reason: format!("{} is not a positive number", self.initial_easiness),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn quality_accepts_one_to_five() {
        for v in 1..=5 {
            assert_eq!(Quality::new(v).unwrap().value(), v);
        }
        assert!(Quality::new(0).is_err());
        assert!(Quality::new(6).is_err());
    }

    #[test]
    fn quality_parses_trimmed_input() {
        assert_eq!(" 4\n".parse::<Quality>().unwrap().value(), 4);
        assert!("four".parse::<Quality>().is_err());
        assert!("".parse::<Quality>().is_err());
        assert!("-1".parse::<Quality>().is_err());
        assert!("300".parse::<Quality>().is_err());
        assert!("3.5".parse::<Quality>().is_err());
    }

    #[test]
    fn quality_success_threshold() {
        assert!(!Quality::new(2).unwrap().is_successful());
        assert!(Quality::new(3).unwrap().is_successful());
    }

    #[test]
    fn has_tags_uses_and_semantics() {
        let mut record = ItemRecord::new("a.md", 2.5);
        record.tags = ["go", "algorithms", "review"]
            .into_iter()
            .map(String::from)
            .collect();

        assert!(record.has_tags(&["go", "algorithms"]));
        assert!(record.has_tags::<&str>(&[]));
        assert!(!record.has_tags(&["go", "rust"]));
    }

    #[test]
    fn never_scheduled_record_is_due() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let mut record = ItemRecord::new("a.md", 2.5);
        assert!(record.is_due(now));

        record.due = Some(now);
        assert!(!record.is_due(now));
    }

    #[test]
    fn interval_unit_conversion() {
        assert_eq!(IntervalUnit::Hours.to_duration(6.0), Some(Duration::hours(6)));
        assert_eq!(IntervalUnit::Days.to_duration(1.5), Some(Duration::hours(36)));
    }

    #[test]
    fn unrepresentable_intervals_have_no_duration() {
        assert_eq!(IntervalUnit::Hours.to_duration(f64::INFINITY), None);
        assert_eq!(IntervalUnit::Hours.to_duration(f64::NAN), None);
        assert_eq!(IntervalUnit::Days.to_duration(1e300), None);
        assert!(IntervalUnit::Hours.to_duration(1e9).is_some());
    }

    #[test]
    fn minimum_easiness_cannot_go_below_floor() {
        assert!(SchedulerSettings::default().validate().is_ok());

        let settings = SchedulerSettings {
            minimum_easiness: 0.5,
            ..SchedulerSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(CoreError::InvalidSetting { name: "minimum_easiness", .. })
        ));

        let settings = SchedulerSettings {
            minimum_easiness: 1.5,
            ..SchedulerSettings::default()
        };
        assert!(settings.validate().is_ok());
    }
}
