// File: src/importer.rs
/*! Calendar-file ingestion.

Turns raw ICS text into a flat list of candidate events: block
splitting, folded-line handling, date resolution, recurrence
classification, and the category/priority heuristics. Pure; the only
observable failure is `FormatError` when the text is not a calendar at
all. Everything date-relative takes `now` as a parameter so imports are
reproducible.
*/

use crate::config::Config;
use crate::model::event::{
    CalendarEvent, Priority, Recurrence, WEEKDAY_NAMES, byday_code_to_name, weekday_name,
};
use crate::model::property::{ParsedProperty, PropertyName, PropertySet, parse_property_line};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;
use std::fmt;

/// The input was not a calendar file at all. Nothing gets imported.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FormatError {
    reason: String,
}

impl FormatError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid calendar data: {}", self.reason)
    }
}

impl std::error::Error for FormatError {}

/// Extracts every parseable VEVENT from `raw`, in source order.
///
/// Fails only when the VCALENDAR wrapper is missing; individual blocks
/// that cannot be resolved (no SUMMARY, no usable DTSTART, no end
/// marker) are dropped silently apart from a debug log line.
pub fn parse_calendar(
    raw: &str,
    now: NaiveDate,
    config: &Config,
) -> Result<Vec<CalendarEvent>, FormatError> {
    let text = raw.replace("\r\n", "\n");
    if !text.contains("BEGIN:VCALENDAR") || !text.contains("END:VCALENDAR") {
        return Err(FormatError::new("missing VCALENDAR wrapper"));
    }

    let mut events = Vec::new();
    for segment in text.split("BEGIN:VEVENT").skip(1) {
        let Some(end) = segment.find("END:VEVENT") else {
            log::debug!("Skipping VEVENT block without an end marker");
            continue;
        };
        if let Some(event) = parse_event_block(&segment[..end], now, config) {
            events.push(event);
        }
    }
    Ok(events)
}

fn parse_event_block(block: &str, now: NaiveDate, config: &Config) -> Option<CalendarEvent> {
    let props = collect_properties(block);
    if !props.contains(PropertyName::Summary) || !props.contains(PropertyName::DtStart) {
        log::debug!("Skipping VEVENT without SUMMARY or DTSTART");
        return None;
    }

    let dtstart = props.get(PropertyName::DtStart)?;
    let date_only = dtstart.is_date_only;
    let Some((mut date, time)) = resolve_date_time(dtstart) else {
        log::debug!(
            "Skipping VEVENT with unresolvable DTSTART '{}'",
            dtstart.value.trim()
        );
        return None;
    };

    let title = props
        .value(PropertyName::Summary)
        .unwrap_or_default()
        .trim()
        .to_string();
    let description = props
        .value(PropertyName::Description)
        .unwrap_or_default()
        .trim()
        .to_string();
    let categories = props
        .value(PropertyName::Categories)
        .unwrap_or_default()
        .trim()
        .to_string();

    let title_lower = title.to_lowercase();
    let categories_lower = categories.to_lowercase();

    let (mut recurrence, mut recurrence_days) =
        classify_recurrence(props.value(PropertyName::Rrule), date);

    // Anniversaries come in as plain one-off events; treat them as yearly
    // unless an RRULE already says otherwise.
    let is_birthday = config.birthday_keywords.iter().any(|kw| {
        let kw = kw.to_lowercase();
        title_lower.contains(&kw) || categories_lower.contains(&kw)
    });
    if is_birthday && recurrence == Recurrence::None {
        recurrence = Recurrence::Yearly;
        recurrence_days = vec![weekday_name(date.weekday()).to_string()];
    }

    // Duration comes from the original DTSTART/DTEND pair, before any
    // year rollover moves the date.
    let duration_minutes = event_duration(&props, date_only, date.and_time(time), config);

    if recurrence == Recurrence::Yearly {
        date = roll_forward_yearly(date, now);
    }

    let category = infer_category(&title_lower, &categories, is_birthday, config);
    let priority = infer_priority(&title_lower, config);

    Some(CalendarEvent {
        title,
        description,
        date,
        time,
        duration_minutes,
        priority,
        category,
        recurrence,
        recurrence_days,
    })
}

/// Scans the block's lines into recognized properties, unfolding
/// continuations onto the property they belong to.
fn collect_properties(block: &str) -> PropertySet {
    let mut props = PropertySet::default();
    let mut last: Option<PropertyName> = None;

    for raw_line in block.lines() {
        if raw_line.starts_with(' ') || raw_line.starts_with('\t') {
            if let Some(name) = last {
                props.append_value(name, raw_line.trim_start());
            }
            continue;
        }
        match parse_property_line(raw_line) {
            Some((name, prop)) => {
                props.insert(name, prop);
                last = Some(name);
            }
            None => {
                // Folds after an unrecognized property belong to it, not
                // to the last recognized one.
                if raw_line.contains(':') {
                    last = None;
                }
            }
        }
    }
    props
}

/// Resolves a DTSTART/DTEND value to a date and time.
///
/// Date-only values and bare 8-digit stamps land on midnight. A trailing
/// `Z` marks UTC fields; the host app has always read those as wall time,
/// so no offset is applied.
fn resolve_date_time(prop: &ParsedProperty) -> Option<(NaiveDate, NaiveTime)> {
    let value = prop.value.trim();
    if prop.is_date_only || value.len() == 8 {
        let date = NaiveDate::parse_from_str(value, "%Y%m%d").ok()?;
        return Some((date, NaiveTime::MIN));
    }
    let body = value.strip_suffix('Z').unwrap_or(value);
    let stamp = NaiveDateTime::parse_from_str(body, "%Y%m%dT%H%M%S").ok()?;
    Some((stamp.date(), stamp.time()))
}

fn classify_recurrence(rrule: Option<&str>, start: NaiveDate) -> (Recurrence, Vec<String>) {
    let Some(rrule) = rrule else {
        return (Recurrence::None, Vec::new());
    };
    let fields = parse_rrule_fields(rrule);
    match fields.get("FREQ").map(String::as_str) {
        Some("YEARLY") => (Recurrence::Yearly, Vec::new()),
        Some("MONTHLY") => (Recurrence::Monthly, Vec::new()),
        Some("WEEKLY") => {
            let days = match fields.get("BYDAY") {
                Some(byday) => byday
                    .split(',')
                    .filter_map(byday_code_to_name)
                    .map(str::to_string)
                    .collect(),
                None => vec![weekday_name(start.weekday()).to_string()],
            };
            (Recurrence::Weekly, days)
        }
        Some("DAILY") => (
            Recurrence::Daily,
            WEEKDAY_NAMES.iter().map(|day| day.to_string()).collect(),
        ),
        _ => (Recurrence::None, Vec::new()),
    }
}

/// RRULE content split into KEY=VALUE fields, uppercased on both sides.
fn parse_rrule_fields(rrule: &str) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    for part in rrule.trim().split(';') {
        if let Some((key, value)) = part.split_once('=') {
            fields.insert(
                key.trim().to_ascii_uppercase(),
                value.trim().to_ascii_uppercase(),
            );
        }
    }
    fields
}

fn event_duration(
    props: &PropertySet,
    date_only: bool,
    start: NaiveDateTime,
    config: &Config,
) -> u32 {
    if date_only {
        return config.all_day_duration_minutes;
    }
    let Some(dtend) = props.get(PropertyName::DtEnd) else {
        return config.default_duration_minutes;
    };
    let Some((end_date, end_time)) = resolve_date_time(dtend) else {
        return config.default_duration_minutes;
    };
    let span = end_date.and_time(end_time) - start;
    let minutes = (span.num_seconds() as f64 / 60.0).round() as i64;
    if minutes <= 0 {
        config.default_duration_minutes
    } else {
        minutes as u32
    }
}

/// Past-dated yearly events move to their next upcoming occurrence so
/// imported anniversaries stay visible going forward.
fn roll_forward_yearly(date: NaiveDate, now: NaiveDate) -> NaiveDate {
    if date.year() >= now.year() {
        return date;
    }
    let rolled = rebase_year(date, now.year());
    if rolled < now {
        rebase_year(date, now.year() + 1)
    } else {
        rolled
    }
}

// Feb 29 sources land on Mar 1 in non-leap years.
fn rebase_year(date: NaiveDate, year: i32) -> NaiveDate {
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(date)
}

fn infer_category(
    title_lower: &str,
    categories: &str,
    is_birthday: bool,
    config: &Config,
) -> String {
    let explicit = categories.trim();
    if !explicit.is_empty() {
        return explicit.to_string();
    }
    if is_birthday {
        return "Birthday".to_string();
    }
    if contains_any(title_lower, &config.meeting_keywords) {
        return "Meeting".to_string();
    }
    if contains_any(title_lower, &config.class_keywords) {
        return "Class".to_string();
    }
    if contains_any(title_lower, &config.assignment_keywords) {
        return "Assignment".to_string();
    }
    config.fallback_category.clone()
}

fn infer_priority(title_lower: &str, config: &Config) -> Priority {
    if contains_any(title_lower, &config.high_priority_keywords) {
        Priority::High
    } else if contains_any(title_lower, &config.low_priority_keywords) {
        Priority::Low
    } else {
        Priority::Medium
    }
}

fn contains_any(haystack_lower: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|kw| haystack_lower.contains(&kw.to_lowercase()))
}
