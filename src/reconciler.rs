// File: src/reconciler.rs
/*! Merges parsed calendar events into the task store.

One listing per distinct event date, then duplicate detection against
what is already stored; creation failures are counted per event. A
batch never aborts halfway: the only hard error is a missing user.
*/

use crate::config::Config;
use crate::model::event::{CalendarEvent, ExistingTask};
use crate::model::interval::{format_minute, minute_of_day};
use crate::store::{TaskPayload, TaskStore};
use chrono::{NaiveDate, Timelike};
use std::collections::HashMap;
use std::fmt;

/// Import was attempted without a signed-in user.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct AuthError;

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no signed-in user for import")
    }
}

impl std::error::Error for AuthError {}

/// Per-batch outcome counts. Every event lands in exactly one bucket.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ImportResult {
    pub added: u32,
    pub skipped: u32,
    pub errors: u32,
}

impl ImportResult {
    pub fn total(&self) -> u32 {
        self.added + self.skipped + self.errors
    }

    /// One-line report for logs and host UIs.
    pub fn summary_line(&self) -> String {
        format!(
            "Found {} events ({} duplicates skipped). Imported {}, {} failed.",
            self.total(),
            self.skipped,
            self.added,
            self.errors
        )
    }
}

/// Writes `events` into `store` for `user_id`, skipping the ones already
/// present. Events created earlier in the same batch count as present.
pub fn reconcile(
    events: &[CalendarEvent],
    user_id: Option<&str>,
    store: &mut dyn TaskStore,
    config: &Config,
) -> Result<ImportResult, AuthError> {
    let Some(user_id) = user_id else {
        return Err(AuthError);
    };

    // Group by date, keeping the dates in first-occurrence order so the
    // store sees creations in roughly source order.
    let mut dates: Vec<NaiveDate> = Vec::new();
    let mut by_date: HashMap<NaiveDate, Vec<&CalendarEvent>> = HashMap::new();
    for event in events {
        if !by_date.contains_key(&event.date) {
            dates.push(event.date);
        }
        by_date.entry(event.date).or_default().push(event);
    }

    let mut result = ImportResult::default();
    for date in dates {
        let mut existing = match store.list_tasks_for_date(date, user_id) {
            Ok(tasks) => tasks,
            Err(e) => {
                log::warn!("Could not list tasks for {date}: {e}; treating the day as empty");
                Vec::new()
            }
        };

        for event in &by_date[&date] {
            if existing.iter().any(|task| is_duplicate(task, event)) {
                log::debug!("Skipping duplicate '{}' on {date}", event.title);
                result.skipped += 1;
                continue;
            }
            let payload = build_payload(event, config);
            match store.create_task(user_id, &payload) {
                Ok(_) => {
                    result.added += 1;
                    existing.push(ExistingTask {
                        title: payload.task_name,
                        date_str: payload.start_date,
                        time_of_day: payload.start_time,
                        duration_minutes: Some(payload.duration),
                    });
                }
                Err(e) => {
                    log::warn!("Could not create task '{}': {e}", payload.task_name);
                    result.errors += 1;
                }
            }
        }
    }
    Ok(result)
}

/// Same title (case-insensitive) starting in the same hour. The hour test
/// is a plain prefix on the stored string, so rows saved in 12-hour form
/// ("9:00 AM") never match the zero-padded "09:" prefix.
fn is_duplicate(task: &ExistingTask, event: &CalendarEvent) -> bool {
    task.title.to_lowercase() == event.title.to_lowercase()
        && task
            .time_of_day
            .starts_with(&format!("{:02}:", event.time.hour()))
}

fn build_payload(event: &CalendarEvent, config: &Config) -> TaskPayload {
    let title = event.title.trim();
    let task_name = if title.is_empty() {
        config.untitled_label.clone()
    } else {
        title.to_string()
    };
    let category = if event.category.trim().is_empty() {
        config.fallback_category.clone()
    } else {
        event.category.clone()
    };
    let duration = if event.duration_minutes == 0 {
        config.default_duration_minutes
    } else {
        event.duration_minutes
    };
    let date_str = event.date.format("%Y-%m-%d").to_string();

    TaskPayload {
        task_name,
        description: event.description.clone(),
        start_date: date_str.clone(),
        end_date: date_str,
        start_time: format_minute(minute_of_day(event.time)),
        priority: event.priority,
        category,
        duration,
        recurring: event.is_recurring() as u8,
        recurring_days: event.recurrence_days.join(","),
    }
}
