// File: src/scheduler.rs
/*! Free-slot suggestion over one day's tasks.

Projects the day's tasks onto minutes-of-day intervals and sweeps the
working window for gaps; the requested duration is then centered inside
the widest gap found. Tasks whose stored time cannot be read are
treated as not occupying time rather than blocking the suggestion.
*/

use crate::config::Config;
use crate::model::event::ExistingTask;
use crate::model::interval::{TimeInterval, format_minute, free_gaps, minute_of_day, parse_clock_time};
use serde::{Deserialize, Serialize};

/// A suggested opening, both bounds as 24-hour "HH:MM".
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start_time: String,
    pub end_time: String,
}

/// Finds room for `duration_minutes` between the configured working-day
/// bounds, given everything already scheduled that day. Returns `None`
/// when no gap is wide enough.
///
/// The widest gap wins; when two gaps tie, the earlier one does. The
/// slot sits centered in its gap so the day keeps slack on both sides.
pub fn find_free_slot(
    existing: &[ExistingTask],
    duration_minutes: u32,
    config: &Config,
) -> Option<FreeSlot> {
    let duration = duration_minutes.max(1);
    let busy: Vec<TimeInterval> = existing
        .iter()
        .filter_map(|task| task_interval(task, config))
        .collect();
    let gaps = free_gaps(
        &busy,
        config.working_day_start_minute,
        config.working_day_end_minute,
    );

    let mut best: Option<TimeInterval> = None;
    for gap in gaps {
        if gap.length() < duration {
            continue;
        }
        // Strictly wider replaces, so ties keep the earliest gap.
        if best.is_none_or(|b| gap.length() > b.length()) {
            best = Some(gap);
        }
    }
    let gap = best?;

    let start = gap.start_minute + (gap.length() - duration) / 2;
    Some(FreeSlot {
        start_time: format_minute(start),
        end_time: format_minute(start + duration),
    })
}

/// The busy interval one stored task occupies, if its time is readable.
fn task_interval(task: &ExistingTask, config: &Config) -> Option<TimeInterval> {
    let Some(time) = parse_clock_time(&task.time_of_day) else {
        log::debug!(
            "Ignoring task '{}' with unreadable time '{}'",
            task.title,
            task.time_of_day
        );
        return None;
    };
    let duration = task
        .duration_minutes
        .filter(|d| *d > 0)
        .unwrap_or(config.default_duration_minutes);
    Some(TimeInterval::from_start(minute_of_day(time), duration))
}
