// File: src/store.rs
/*! The task-store boundary.

Persistence is owned by the surrounding application; this crate only
talks to it through the `TaskStore` trait. `MemoryStore` is the
in-memory implementation used by the test suites and by hosts that want
to preview an import without touching their database.
*/

use crate::model::event::ExistingTask;
use crate::model::event::Priority;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use uuid::Uuid;

/// Identifier the store assigns to a created task.
pub type TaskId = String;

// --- ERRORS ---

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum StoreError {
    /// Listing tasks for a date failed. The reconciler logs this and
    /// proceeds as if the date had no tasks.
    Read(String),
    /// Creating one task failed. Counted per event; never aborts a batch.
    Write(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Read(msg) => write!(f, "task listing failed: {}", msg),
            StoreError::Write(msg) => write!(f, "task creation failed: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

// --- CREATION PAYLOAD ---

/// The create-task request exactly as the host app's API takes it, so
/// serializing it yields the wire field names unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    pub task_name: String,
    pub description: String,
    /// "YYYY-MM-DD"
    pub start_date: String,
    /// "YYYY-MM-DD"; equals `start_date` for imported events.
    pub end_date: String,
    /// 24-hour "HH:MM"
    pub start_time: String,
    pub priority: Priority,
    pub category: String,
    /// Minutes.
    pub duration: u32,
    /// 0 or 1.
    pub recurring: u8,
    /// Comma-joined weekday labels; empty when not recurring.
    pub recurring_days: String,
}

// --- STORE TRAIT ---

/// What the core needs from the surrounding application's task storage.
pub trait TaskStore {
    /// All of one user's tasks on one date.
    fn list_tasks_for_date(
        &self,
        date: NaiveDate,
        user_id: &str,
    ) -> Result<Vec<ExistingTask>, StoreError>;

    /// Persists one task and returns its new id.
    fn create_task(&mut self, user_id: &str, payload: &TaskPayload) -> Result<TaskId, StoreError>;
}

// --- IN-MEMORY IMPLEMENTATION ---

/// In-memory `TaskStore` keeping rows per user in insertion order.
///
/// Failure injection mirrors the two store error paths: a poisoned date
/// fails every listing for it, a rejected title fails every creation
/// carrying it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: HashMap<String, Vec<(TaskId, ExistingTask)>>,
    poisoned_dates: HashSet<String>,
    rejected_titles: HashSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a row directly, bypassing the creation path. Used to model
    /// tasks that existed before an import ran.
    pub fn seed(&mut self, user_id: &str, task: ExistingTask) -> TaskId {
        let id = Uuid::new_v4().to_string();
        self.rows
            .entry(user_id.to_string())
            .or_default()
            .push((id.clone(), task));
        id
    }

    /// Every listing for `date` will fail with `StoreError::Read`.
    pub fn fail_reads_on(&mut self, date: NaiveDate) {
        self.poisoned_dates.insert(date.to_string());
    }

    /// Every creation whose task name equals `title` will fail with
    /// `StoreError::Write`.
    pub fn reject_title(&mut self, title: &str) {
        self.rejected_titles.insert(title.to_string());
    }

    /// All rows stored for one user, in insertion order.
    pub fn tasks_for(&self, user_id: &str) -> Vec<ExistingTask> {
        self.rows
            .get(user_id)
            .map(|rows| rows.iter().map(|(_, task)| task.clone()).collect())
            .unwrap_or_default()
    }

    pub fn task_count(&self, user_id: &str) -> usize {
        self.rows.get(user_id).map_or(0, Vec::len)
    }
}

impl TaskStore for MemoryStore {
    fn list_tasks_for_date(
        &self,
        date: NaiveDate,
        user_id: &str,
    ) -> Result<Vec<ExistingTask>, StoreError> {
        let date_str = date.to_string();
        if self.poisoned_dates.contains(&date_str) {
            return Err(StoreError::Read(format!("listing poisoned for {}", date_str)));
        }
        Ok(self
            .rows
            .get(user_id)
            .map(|rows| {
                rows.iter()
                    .filter(|(_, task)| task.date_str == date_str)
                    .map(|(_, task)| task.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    fn create_task(&mut self, user_id: &str, payload: &TaskPayload) -> Result<TaskId, StoreError> {
        if self.rejected_titles.contains(&payload.task_name) {
            return Err(StoreError::Write(format!(
                "creation rejected for '{}'",
                payload.task_name
            )));
        }
        let task = ExistingTask {
            title: payload.task_name.clone(),
            date_str: payload.start_date.clone(),
            time_of_day: payload.start_time.clone(),
            duration_minutes: Some(payload.duration),
        };
        Ok(self.seed(user_id, task))
    }
}
