// File: tests/scheduling_tests.rs
use chrono::NaiveDate;
use horaire::config::Config;
use horaire::controller;
use horaire::model::{ExistingTask, Priority};
use horaire::scheduler::find_free_slot;
use horaire::store::{MemoryStore, TaskPayload, TaskStore};

fn task(title: &str, time: &str, duration: Option<u32>) -> ExistingTask {
    ExistingTask {
        title: title.to_string(),
        date_str: "2024-06-10".to_string(),
        time_of_day: time.to_string(),
        duration_minutes: duration,
    }
}

#[test]
fn test_ninety_minutes_between_two_meetings() {
    let tasks = [
        task("Standup", "09:00", Some(60)),
        task("Planning", "11:00", Some(60)),
    ];
    let slot = find_free_slot(&tasks, 90, &Config::default()).unwrap();
    assert_eq!(slot.start_time, "17:15");
    assert_eq!(slot.end_time, "18:45");
}

#[test]
fn test_day_without_room_returns_none() {
    // One task covering the whole working window.
    let tasks = [task("Conference", "09:00", Some(15 * 60))];
    assert!(find_free_slot(&tasks, 30, &Config::default()).is_none());
}

#[test]
fn test_widest_gap_beats_first_gap() {
    // 10:00-11:00 free (60), then 12:00-24:00 free (720).
    let tasks = [
        task("Morning", "09:00", Some(60)),
        task("Lunch talk", "11:00", Some(60)),
    ];
    let slot = find_free_slot(&tasks, 30, &Config::default()).unwrap();
    // Centered in the afternoon gap, not the morning one.
    assert_eq!(slot.start_time, "17:45");
    assert_eq!(slot.end_time, "18:15");
}

#[test]
fn test_stored_twelve_hour_rows_participate() {
    let tasks = [
        task("Standup", "9:00 AM", Some(60)),
        task("Planning", "11:00 am", Some(60)),
    ];
    let slot = find_free_slot(&tasks, 90, &Config::default()).unwrap();
    assert_eq!(slot.start_time, "17:15");
    assert_eq!(slot.end_time, "18:45");
}

#[test]
fn test_custom_working_window() {
    let config = Config {
        working_day_start_minute: 480,  // 08:00
        working_day_end_minute: 1020,   // 17:00
        ..Config::default()
    };
    let tasks = [task("Standup", "08:00", Some(60))];
    let slot = find_free_slot(&tasks, 120, &config).unwrap();
    // Free 09:00-17:00 (480 minutes), slot centered.
    assert_eq!(slot.start_time, "12:00");
    assert_eq!(slot.end_time, "14:00");
}

#[test]
fn test_tasks_outside_window_do_not_matter() {
    // Finishes right at the window start.
    let tasks = [task("Early gym", "07:00", Some(120))];
    let slot = find_free_slot(&tasks, 60, &Config::default()).unwrap();
    assert_eq!(slot.start_time, "16:00");
    assert_eq!(slot.end_time, "17:00");
}

#[test]
fn test_proposal_after_import() {
    let ics = r#"BEGIN:VCALENDAR
VERSION:2.0
BEGIN:VEVENT
SUMMARY:Team Sync
DTSTART:20240610T140000
DTEND:20240610T150000
END:VEVENT
BEGIN:VEVENT
SUMMARY:Planning
DTSTART:20240610T090000
DTEND:20240610T100000
END:VEVENT
END:VCALENDAR"#;

    let mut store = MemoryStore::new();
    let config = Config::default();
    let now = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    controller::import_calendar(ics, Some("alice"), &mut store, now, &config).unwrap();

    let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    let slot = controller::propose_slot(&store, "alice", date, 60, &config)
        .unwrap()
        .unwrap();

    // Busy 09:00-10:00 and 14:00-15:00; widest gap is 15:00-24:00.
    assert_eq!(slot.start_time, "19:00");
    assert_eq!(slot.end_time, "20:00");
}

#[test]
fn test_other_days_do_not_block_proposals() {
    let mut store = MemoryStore::new();
    let config = Config::default();
    store.create_task(
        "alice",
        &TaskPayload {
            task_name: "Busy elsewhere".to_string(),
            description: String::new(),
            start_date: "2024-06-11".to_string(),
            end_date: "2024-06-11".to_string(),
            start_time: "09:00".to_string(),
            priority: Priority::Medium,
            category: "Meeting".to_string(),
            duration: 900,
            recurring: 0,
            recurring_days: String::new(),
        },
    )
    .unwrap();

    // June 10th is untouched by June 11th's marathon.
    let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    let slot = controller::propose_slot(&store, "alice", date, 60, &config)
        .unwrap()
        .unwrap();
    assert_eq!(slot.start_time, "16:00");
}
