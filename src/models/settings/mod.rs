// Settings module
// Per-month grid start days and the external dialogue editor location

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::Weekday;
use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::date::{month_abbrev, parse_month, weekday_from_ordinal};

/// Persisted calendar preferences.
///
/// Field names are written in PascalCase so files produced by older builds
/// load unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    /// Month abbreviation -> weekday ordinal (0 = Sunday) of the grid's first column.
    #[serde(
        rename = "MonthStartDays",
        alias = "monthStartDays",
        alias = "month_start_days",
        deserialize_with = "deserialize_month_keys"
    )]
    pub month_start_days: BTreeMap<String, u8>,
    #[serde(rename = "DialogueAppPath", alias = "dialogueAppPath", alias = "dialogue_app_path")]
    pub dialogue_app_path: String,
}

impl CalendarSettings {
    /// First weekday configured for a month, Sunday when unset or invalid.
    pub fn first_weekday(&self, month: &str) -> Weekday {
        self.month_start_days
            .get(&settings_key(month))
            .and_then(|ordinal| weekday_from_ordinal(*ordinal))
            .unwrap_or(Weekday::Sun)
    }

    pub fn set_first_weekday(&mut self, month: &str, weekday: Weekday) {
        self.month_start_days
            .insert(settings_key(month), weekday.num_days_from_sunday() as u8);
    }
}

/// Canonical key for a month: its abbreviation, whatever case the caller used.
fn settings_key(month: &str) -> String {
    parse_month(month)
        .and_then(month_abbrev)
        .map(str::to_string)
        .unwrap_or_else(|| month.trim().to_string())
}

/// Older builds keyed months by upper-cased folder name ("MAR").
fn deserialize_month_keys<'de, D>(deserializer: D) -> Result<BTreeMap<String, u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, u8>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(month, ordinal)| (settings_key(&month), ordinal))
        .collect())
}

/// Explicit application configuration, passed to services instead of globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Workspace root holding `eventlist.csv`, `KR/` and `EN/`.
    pub root: PathBuf,
    pub csv_path: PathBuf,
    /// Year used for month lengths.
    pub year: i32,
}

impl AppConfig {
    pub const EVENT_LIST_FILE: &'static str = "eventlist.csv";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            csv_path: root.join(Self::EVENT_LIST_FILE),
            root,
            year: crate::utils::date::current_year(),
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }
}
