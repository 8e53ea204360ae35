//! Test fixtures and factory functions.

use chrono::{DateTime, Duration, TimeZone, Utc};

use askme_core::ItemRecord;

/// Fixed "current time" for all tests.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub fn hours_from_now(hours: i64) -> Option<DateTime<Utc>> {
    Some(now() + Duration::hours(hours))
}

/// A record with explicit scheduling state.
pub fn record(
    identifier: &str,
    repetitions: u32,
    easiness: f64,
    interval: f64,
    due: Option<DateTime<Utc>>,
) -> ItemRecord {
    ItemRecord {
        repetitions,
        easiness,
        interval,
        due,
        ..ItemRecord::new(identifier, easiness)
    }
}

pub fn tagged(mut record: ItemRecord, tags: &[&str]) -> ItemRecord {
    record.tags = tags.iter().map(|t| t.to_string()).collect();
    record
}

/// Markdown item content with an optional tags line.
pub fn item_content(title: &str, tags: &[&str]) -> String {
    if tags.is_empty() {
        format!("# {title}\n\nAnswer for {title}.\n")
    } else {
        format!("# {title}\nTags: {}\n\nAnswer for {title}.\n", tags.join(", "))
    }
}
