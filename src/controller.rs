// File: src/controller.rs
//! Entry points tying the import and scheduling pipelines together.
//! Host applications (mobile bridge, CLI, tests) call these instead of
//! wiring the parser, reconciler and scheduler by hand, so logging and
//! defaulting stay consistent across callers.

use crate::config::Config;
use crate::importer;
use crate::reconciler::{self, ImportResult};
use crate::scheduler::{self, FreeSlot};
use crate::store::TaskStore;
use chrono::NaiveDate;

/// Runs a full calendar import.
///
/// 1. Parse `raw_text` into candidate events. This fails only when the
///    text is not a calendar at all; unusable blocks are dropped.
/// 2. Reconcile the events into `store` for `user_id`, skipping
///    duplicates and counting per-event failures.
/// 3. Log the outcome summary.
///
/// `now` anchors the year rollover for recurring yearly events, so
/// callers pass their clock in and imports stay reproducible.
pub fn import_calendar(
    raw_text: &str,
    user_id: Option<&str>,
    store: &mut dyn TaskStore,
    now: NaiveDate,
    config: &Config,
) -> anyhow::Result<ImportResult> {
    let events = importer::parse_calendar(raw_text, now, config)?;
    let result = reconciler::reconcile(&events, user_id, store, config)?;
    log::info!("{}", result.summary_line());
    Ok(result)
}

/// Suggests where a new task of `duration_minutes` could go on `date`.
///
/// Unlike during import, a store read failure is surfaced here: a
/// suggestion made blind to the day's tasks could double-book it.
pub fn propose_slot(
    store: &dyn TaskStore,
    user_id: &str,
    date: NaiveDate,
    duration_minutes: u32,
    config: &Config,
) -> anyhow::Result<Option<FreeSlot>> {
    let tasks = store.list_tasks_for_date(date, user_id)?;
    Ok(scheduler::find_free_slot(&tasks, duration_minutes, config))
}
