// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;

fn default_working_day_start() -> u32 {
    540
}
fn default_working_day_end() -> u32 {
    1440
}

fn default_duration() -> u32 {
    60
}
fn default_all_day_duration() -> u32 {
    1440
}

fn default_untitled_label() -> String {
    "Untitled Event".to_string()
}
fn default_fallback_category() -> String {
    "Import".to_string()
}

fn default_birthday_keywords() -> Vec<String> {
    vec!["birthday".to_string(), "bday".to_string()]
}
fn default_meeting_keywords() -> Vec<String> {
    vec![
        "meeting".to_string(),
        "conference".to_string(),
        "sync".to_string(),
    ]
}
fn default_class_keywords() -> Vec<String> {
    vec![
        "class".to_string(),
        "lecture".to_string(),
        "lab".to_string(),
    ]
}
fn default_assignment_keywords() -> Vec<String> {
    vec![
        "deadline".to_string(),
        "due".to_string(),
        "assignment".to_string(),
    ]
}
fn default_high_priority_keywords() -> Vec<String> {
    vec!["important".to_string(), "urgent".to_string()]
}
fn default_low_priority_keywords() -> Vec<String> {
    vec!["optional".to_string(), "tentative".to_string()]
}

/// Heuristic knobs for import classification and slot search. Every
/// default matches the host app's historical behavior; overriding a
/// keyword list changes inference without touching parsing logic.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    /// Start of the schedulable window, minutes after midnight (09:00).
    #[serde(default = "default_working_day_start")]
    pub working_day_start_minute: u32,
    /// End of the schedulable window, minutes after midnight (24:00).
    #[serde(default = "default_working_day_end")]
    pub working_day_end_minute: u32,

    #[serde(default = "default_duration")]
    pub default_duration_minutes: u32,
    #[serde(default = "default_all_day_duration")]
    pub all_day_duration_minutes: u32,

    #[serde(default = "default_untitled_label")]
    pub untitled_label: String,
    #[serde(default = "default_fallback_category")]
    pub fallback_category: String,

    #[serde(default = "default_birthday_keywords")]
    pub birthday_keywords: Vec<String>,
    #[serde(default = "default_meeting_keywords")]
    pub meeting_keywords: Vec<String>,
    #[serde(default = "default_class_keywords")]
    pub class_keywords: Vec<String>,
    #[serde(default = "default_assignment_keywords")]
    pub assignment_keywords: Vec<String>,
    #[serde(default = "default_high_priority_keywords")]
    pub high_priority_keywords: Vec<String>,
    #[serde(default = "default_low_priority_keywords")]
    pub low_priority_keywords: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        // Match the serde defaults
        Self {
            working_day_start_minute: 540,
            working_day_end_minute: 1440,
            default_duration_minutes: 60,
            all_day_duration_minutes: 1440,
            untitled_label: "Untitled Event".to_string(),
            fallback_category: "Import".to_string(),
            birthday_keywords: default_birthday_keywords(),
            meeting_keywords: default_meeting_keywords(),
            class_keywords: default_class_keywords(),
            assignment_keywords: default_assignment_keywords(),
            high_priority_keywords: default_high_priority_keywords(),
            low_priority_keywords: default_low_priority_keywords(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// A missing file yields the defaults; a present but unreadable or
    /// malformed file is a contextualized error.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        // Read the file with contextualized error (covers permission/IO issues).
        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        // Parse TOML with contextualized error (covers syntax issues).
        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&path, toml_str).map_err(|e| {
            anyhow::anyhow!("Failed to write config file '{}': {}", path.display(), e)
        })?;
        Ok(())
    }

    /// Get the path string using an explicit context.
    pub fn get_path_string(ctx: &dyn AppContext) -> Result<String> {
        let path = ctx.get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }
}
