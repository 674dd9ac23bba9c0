use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::models::settings::CalendarSettings;

const SETTINGS_FILE: &str = "settings.json";

/// JSON-backed persistence for [`CalendarSettings`].
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform data directory, e.g. `~/.local/share/dialoguecalendar/settings.json`.
    pub fn at_default_location() -> Result<Self> {
        let dirs = ProjectDirs::from("com", "DialogueCalendar", "DialogueCalendar")
            .context("Failed to determine the application data directory")?;
        Ok(Self::new(dirs.data_dir().join(SETTINGS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults when the file is missing or unreadable.
    pub fn load(&self) -> CalendarSettings {
        if !self.path.exists() {
            log::info!("Settings file not found at {:?}, using defaults", self.path);
            return CalendarSettings::default();
        }

        match self.read() {
            Ok(settings) => {
                log::debug!(
                    "Loaded settings from {:?}: {} month start days",
                    self.path,
                    settings.month_start_days.len()
                );
                settings
            }
            Err(e) => {
                log::warn!("Failed to load settings: {:#}", e);
                CalendarSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &CalendarSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }

        let data = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write settings to {}", self.path.display()))?;
        Ok(())
    }

    fn read(&self) -> Result<CalendarSettings> {
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read settings from {}", self.path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("failed to deserialize settings from {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        assert_eq!(store.load(), CalendarSettings::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("nested/settings.json"));

        let mut settings = CalendarSettings::default();
        settings.set_first_weekday("Oct", Weekday::Fri);
        settings.dialogue_app_path = "/opt/dialogue/DialogueApp".to_string();
        store.save(&settings).unwrap();

        assert_eq!(store.load(), settings);
        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"MonthStartDays\""));
    }

    #[test]
    fn test_upper_case_month_keys_are_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        fs::write(store.path(), r#"{"MonthStartDays":{"MAR":3}}"#).unwrap();

        let settings = store.load();
        assert_eq!(settings.first_weekday("Mar"), Weekday::Wed);

        store.save(&settings).unwrap();
        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains(r#""Mar": 3"#));
        assert!(!raw.contains("MAR"));
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(SettingsStore::new(path).load(), CalendarSettings::default());
    }
}
