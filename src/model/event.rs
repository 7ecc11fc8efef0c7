// File: src/model/event.rs
use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weekday labels in calendar order (Sunday first), as the host app
/// stores and displays them.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES[day.num_days_from_sunday() as usize]
}

/// Maps an RRULE BYDAY code ("MO", "TU", ...) to its weekday label.
pub fn byday_code_to_name(code: &str) -> Option<&'static str> {
    match code.trim().to_ascii_uppercase().as_str() {
        "SU" => Some("Sunday"),
        "MO" => Some("Monday"),
        "TU" => Some("Tuesday"),
        "WE" => Some("Wednesday"),
        "TH" => Some("Thursday"),
        "FR" => Some("Friday"),
        "SA" => Some("Saturday"),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// One candidate event extracted from a calendar file. Built once per
/// VEVENT block, immutable afterwards; the reconciler consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: u32,
    pub priority: Priority,
    pub category: String,
    pub recurrence: Recurrence,
    /// Weekday labels the instances fall on; empty unless recurring.
    pub recurrence_days: Vec<String>,
}

impl CalendarEvent {
    pub fn is_recurring(&self) -> bool {
        self.recurrence != Recurrence::None
    }
}

/// A task row as the store hands it back. `time_of_day` arrives as
/// 12-hour "H:MM AM/PM" or 24-hour "H:MM" depending on how the row was
/// created; the scheduler normalizes both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistingTask {
    pub title: String,
    pub date_str: String,
    pub time_of_day: String,
    pub duration_minutes: Option<u32>,
}
