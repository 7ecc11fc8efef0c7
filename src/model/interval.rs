// File: src/model/interval.rs
/*! Minute-of-day interval arithmetic.

Shared vocabulary for the duplicate check and the free-slot search: a
day is 1440 minutes, a task occupies `[start, start + duration)`, and
free time is whatever the sweep leaves uncovered inside the working
window.
*/

use chrono::{NaiveTime, Timelike};

/// A busy or free span within one day, in minutes after midnight.
///
/// `start_minute` stays below 1440; `end_minute` may pass it when a
/// task runs over midnight, and the gap sweep clamps back to the day.
/// Invariant: `start_minute < end_minute`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TimeInterval {
    pub start_minute: u32,
    pub end_minute: u32,
}

impl TimeInterval {
    /// Span starting at `start_minute` and running for `duration_minutes`.
    /// Durations are floored to one minute so the span is never empty; the
    /// end saturates instead of wrapping when a stored duration is absurd.
    pub fn from_start(start_minute: u32, duration_minutes: u32) -> Self {
        Self {
            start_minute,
            end_minute: start_minute.saturating_add(duration_minutes.max(1)),
        }
    }

    pub fn length(&self) -> u32 {
        self.end_minute - self.start_minute
    }
}

pub fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Renders a minute offset as 24-hour "HH:MM". Minute 1440 renders as
/// "24:00", the exclusive end of the day.
pub fn format_minute(minute: u32) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

/// Parses a stored time-of-day string. A trailing AM/PM marker selects
/// the 12-hour clock; anything else is read as 24-hour "H:MM".
pub fn parse_clock_time(s: &str) -> Option<NaiveTime> {
    let lower = s.trim().to_lowercase();

    // Helper for 12h
    let parse_12h = |body: &str, is_pm: bool| -> Option<NaiveTime> {
        let body = body.trim();
        let (h, m) = if let Some((h_str, m_str)) = body.split_once(':') {
            (
                h_str.trim().parse::<u32>().ok()?,
                m_str.trim().parse::<u32>().ok()?,
            )
        } else {
            (body.parse::<u32>().ok()?, 0)
        };
        if !(1..=12).contains(&h) || m > 59 {
            return None;
        }
        let h_24 = if h == 12 {
            if is_pm { 12 } else { 0 }
        } else if is_pm {
            h + 12
        } else {
            h
        };
        NaiveTime::from_hms_opt(h_24, m, 0)
    };

    if let Some(stripped) = lower.strip_suffix("am") {
        return parse_12h(stripped, false);
    }
    if let Some(stripped) = lower.strip_suffix("pm") {
        return parse_12h(stripped, true);
    }

    let (h_str, m_str) = lower.split_once(':')?;
    let h = h_str.trim().parse::<u32>().ok()?;
    let m = m_str.trim().parse::<u32>().ok()?;
    NaiveTime::from_hms_opt(h, m, 0)
}

/// Free spans of `[day_start, day_end)` left over after sweeping the
/// busy intervals through it. Input order does not matter; overlapping
/// busy spans merge through the cursor. Output gaps are disjoint and
/// sorted, clamped to the window.
pub fn free_gaps(busy: &[TimeInterval], day_start: u32, day_end: u32) -> Vec<TimeInterval> {
    let mut sorted = busy.to_vec();
    sorted.sort_by_key(|iv| iv.start_minute);

    let mut gaps = Vec::new();
    let mut cursor = day_start;
    for iv in sorted {
        if cursor >= day_end {
            break;
        }
        if iv.start_minute > cursor {
            gaps.push(TimeInterval {
                start_minute: cursor,
                end_minute: iv.start_minute.min(day_end),
            });
        }
        cursor = cursor.max(iv.end_minute);
    }
    if cursor < day_end {
        gaps.push(TimeInterval {
            start_minute: cursor,
            end_minute: day_end,
        });
    }
    gaps
}
