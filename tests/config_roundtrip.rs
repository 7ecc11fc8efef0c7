use horaire::config::Config;
use horaire::context::{AppContext, TestContext};
use serial_test::serial;
use std::fs;

#[test]
#[serial]
fn test_missing_file_yields_defaults() {
    let ctx = TestContext::new();
    let config = Config::load(&ctx).unwrap();

    assert_eq!(config.working_day_start_minute, 540);
    assert_eq!(config.working_day_end_minute, 1440);
    assert_eq!(config.default_duration_minutes, 60);
    assert_eq!(config.fallback_category, "Import");
    assert!(config.meeting_keywords.contains(&"sync".to_string()));
}

#[test]
#[serial]
fn test_save_then_load_round_trip() {
    let ctx = TestContext::new();

    let mut config = Config::default();
    config.working_day_start_minute = 420;
    config.default_duration_minutes = 45;
    config.birthday_keywords.push("anniversaire".to_string());
    config.save(&ctx).unwrap();

    let loaded = Config::load(&ctx).unwrap();
    assert_eq!(loaded.working_day_start_minute, 420);
    assert_eq!(loaded.default_duration_minutes, 45);
    assert!(loaded.birthday_keywords.contains(&"anniversaire".to_string()));
    // Untouched fields survive the trip too.
    assert_eq!(loaded.untitled_label, "Untitled Event");
}

#[test]
#[serial]
fn test_partial_file_fills_in_defaults() {
    let ctx = TestContext::new();
    let path = ctx.get_config_file_path().unwrap();
    fs::write(&path, "working_day_start_minute = 600\n").unwrap();

    let config = Config::load(&ctx).unwrap();
    assert_eq!(config.working_day_start_minute, 600);
    assert_eq!(config.working_day_end_minute, 1440);
    assert_eq!(config.all_day_duration_minutes, 1440);
    assert!(!config.high_priority_keywords.is_empty());
}

#[test]
#[serial]
fn test_malformed_file_is_reported() {
    let ctx = TestContext::new();
    let path = ctx.get_config_file_path().unwrap();
    fs::write(&path, "working_day_start_minute = \"nine\"").unwrap();

    let err = Config::load(&ctx).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
#[serial]
fn test_path_points_inside_the_context() {
    let ctx = TestContext::new();
    let path = Config::get_path_string(&ctx).unwrap();
    assert!(path.ends_with("config.toml"));
    assert!(path.contains("horaire_test_"));
}
