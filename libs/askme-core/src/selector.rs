//! Selection of the next item to review.

use crate::types::ItemRecord;
use chrono::{DateTime, Utc};

/// Pick the item to present next, or `None` when nothing is due.
///
/// Records are narrowed to those carrying every tag in `tag_filter`, ordered
/// by due time descending, and scanned for the first record due strictly
/// before `now`. A record that was never scheduled is only taken when no
/// scheduled record is overdue; among several such records the last one
/// scanned wins.
pub fn select_next<'a, S: AsRef<str>>(
    records: &'a [ItemRecord],
    tag_filter: &[S],
    now: DateTime<Utc>,
) -> Option<&'a ItemRecord> {
    let mut candidates: Vec<&ItemRecord> = records
        .iter()
        .filter(|r| r.has_tags(tag_filter))
        .collect();

    if candidates.is_empty() {
        return None;
    }

    // `None` orders before every `Some`, so unscheduled records land last.
    candidates.sort_by(|a, b| b.due.cmp(&a.due));

    let mut selected = None;
    for record in candidates {
        match record.due {
            Some(due) if due < now => return Some(record),
            Some(_) => {}
            None => selected = Some(record),
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 18, 0, 0).unwrap()
    }

    fn record(id: &str, repetitions: u32, due: Option<DateTime<Utc>>, tags: &[&str]) -> ItemRecord {
        ItemRecord {
            repetitions,
            due,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..ItemRecord::new(id, 2.5)
        }
    }

    fn selected_id<'a>(records: &'a [ItemRecord], filter: &[&str]) -> Option<&'a str> {
        select_next(records, filter, now()).map(|r| r.identifier.as_str())
    }

    #[test]
    fn empty_index_has_nothing_to_study() {
        assert_eq!(selected_id(&[], &[]), None);
    }

    #[test]
    fn prefers_most_recently_due_overdue_record() {
        let records = vec![
            record("never.md", 0, Some(now() - Duration::hours(2)), &[]),
            record("reviewed.md", 2, Some(now() - Duration::hours(1)), &[]),
            record("future.md", 1, Some(now() + Duration::hours(1)), &[]),
        ];
        assert_eq!(selected_id(&records, &[]), Some("reviewed.md"));
    }

    #[test]
    fn scheduled_overdue_beats_unscheduled() {
        let records = vec![
            record("fresh.md", 0, None, &[]),
            record("old.md", 3, Some(now() - Duration::days(30)), &[]),
        ];
        assert_eq!(selected_id(&records, &[]), Some("old.md"));
    }

    #[test]
    fn falls_back_to_unscheduled_record() {
        let records = vec![
            record("future.md", 1, Some(now() + Duration::hours(3)), &[]),
            record("fresh.md", 0, None, &[]),
        ];
        assert_eq!(selected_id(&records, &[]), Some("fresh.md"));
    }

    #[test]
    fn last_unscheduled_record_wins_the_fallback() {
        let records = vec![
            record("first.md", 0, None, &[]),
            record("second.md", 0, None, &[]),
            record("third.md", 0, None, &[]),
        ];
        assert_eq!(selected_id(&records, &[]), Some("third.md"));
    }

    #[test]
    fn nothing_due_when_all_in_future() {
        let records = vec![
            record("a.md", 1, Some(now() + Duration::hours(1)), &[]),
            record("b.md", 2, Some(now() + Duration::days(2)), &[]),
        ];
        assert_eq!(selected_id(&records, &[]), None);
    }

    #[test]
    fn due_exactly_now_is_not_overdue() {
        let records = vec![record("a.md", 1, Some(now()), &[])];
        assert_eq!(selected_id(&records, &[]), None);
    }

    #[test]
    fn tag_filter_requires_all_tags() {
        let due = Some(now() - Duration::hours(1));
        let records = vec![
            record("both.md", 1, due, &["go", "algorithms", "review"]),
            record("go-only.md", 1, due, &["go"]),
            record("untagged.md", 1, due, &[]),
        ];

        let matching: Vec<&str> = records
            .iter()
            .filter(|r| r.has_tags(&["go", "algorithms"]))
            .map(|r| r.identifier.as_str())
            .collect();
        assert_eq!(matching, vec!["both.md"]);
        assert_eq!(selected_id(&records, &["go", "algorithms"]), Some("both.md"));
    }

    #[test]
    fn tag_filter_matching_nothing() {
        let records = vec![record("a.md", 1, None, &["go"])];
        assert_eq!(selected_id(&records, &["rust"]), None);
    }
}
