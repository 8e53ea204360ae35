//! Review session: pick one due item, ask for a rating, reschedule it.

use super::{open_lock, Console};
use crate::config::AppConfig;
use crate::error::Result;
use crate::prompt::read_rating;
use crate::render::{render_markdown, DEFAULT_WIDTH};
use crate::store::IndexRepository;
use askme_core::{select_next, SchedulingResult, SpacedRepetitionAlgorithm};
use chrono::{DateTime, Local, Utc};
use std::io::Write;
use tracing::info;

pub const NOTHING_TO_STUDY: &str = "No questions to study.";

/// How a review session ended.
#[derive(Debug)]
pub enum ReviewOutcome {
    NothingToStudy,
    Reviewed(SchedulingResult),
}

/// Run one review session restricted to items carrying every tag in `tags`.
///
/// `clock` is consulted once for selection and again after the rating is
/// entered, so the new due time counts from the moment of rating.
pub fn run(
    config: &AppConfig,
    tags: &[String],
    console: &mut Console<'_>,
    clock: &dyn Fn() -> DateTime<Utc>,
) -> Result<ReviewOutcome> {
    let mut lock = open_lock(config)?;
    let _guard = lock.as_mut().map(|l| l.try_acquire()).transpose()?;

    let store = config.index_store();
    let content = config.content_store();
    let algorithm = config.algorithm();

    let mut index = store.load()?;
    if !tags.is_empty() {
        content.load_tags(&mut index)?;
    }

    let Some(selected) = select_next(index.records(), tags, clock()) else {
        writeln!(console.output, "{NOTHING_TO_STUDY}")?;
        return Ok(ReviewOutcome::NothingToStudy);
    };
    let selected = selected.clone();
    info!(
        identifier = %selected.identifier,
        repetitions = selected.repetitions,
        easiness = selected.easiness,
        interval = selected.interval,
        "selected item"
    );

    let text = content.read(&selected.identifier)?;
    let stars = "*".repeat(30);
    writeln!(console.output, "{stars} Asking {:?} {stars}", selected.identifier)?;
    writeln!(
        console.output,
        "{}\n",
        render_markdown(&text, DEFAULT_WIDTH, console.use_color)
    )?;

    let quality = read_rating(&mut *console.input, &mut *console.output)?;
    let result = algorithm.schedule(&selected, quality, clock());
    info!(
        identifier = %result.record.identifier,
        quality = quality.value(),
        repetitions = result.record.repetitions,
        easiness = result.record.easiness,
        interval = result.record.interval,
        "rescheduled item"
    );

    index.update(result.record.clone())?;
    store.save(&index)?;

    writeln!(
        console.output,
        "Next review after {}",
        result.next_due.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    )?;
    Ok(ReviewOutcome::Reviewed(result))
}
