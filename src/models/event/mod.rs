// Event module
// Calendar event record referencing a KR/EN pair of dialogue files

use std::path::{Path, PathBuf};

use crate::models::language::Language;
use crate::models::time_slot::TimeSlot;

/// One calendar entry with scheduling fields and two dialogue-file references.
///
/// The dialogue paths are always canonical
/// (`<root>/<LANG>/<MonthAbbrev>/<day>/<file>.json`) and share the same file
/// stem. Whether the files exist is never stored; see [`EventRecord::dialogue_exists`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub id: i64,
    pub month: u32,
    pub day: u32,
    pub weekday_label: String,
    pub time_slot: TimeSlot,
    pub location: String,
    pub conditions: String,
    pub kr_dialogue: PathBuf,
    pub en_dialogue: PathBuf,
    pub description: String,
}

impl EventRecord {
    /// Create a builder for constructing records with optional fields
    pub fn builder() -> EventRecordBuilder {
        EventRecordBuilder::new()
    }

    /// Dialogue path for one language variant.
    pub fn dialogue_path(&self, lang: Language) -> &Path {
        match lang {
            Language::Kr => &self.kr_dialogue,
            Language::En => &self.en_dialogue,
        }
    }

    /// Checked against the filesystem on every call.
    pub fn dialogue_exists(&self, lang: Language) -> bool {
        self.dialogue_path(lang).is_file()
    }

    /// File stem shared by both variants, taken from the KR path.
    pub fn file_base(&self) -> String {
        self.kr_dialogue
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Whether this record belongs on the given calendar day.
    pub fn falls_on(&self, month: u32, day: u32) -> bool {
        self.month == month && self.day == day
    }
}

/// Builder for creating event records
pub struct EventRecordBuilder {
    id: Option<i64>,
    month: Option<u32>,
    day: Option<u32>,
    weekday_label: String,
    time_slot: TimeSlot,
    location: String,
    conditions: String,
    kr_dialogue: Option<PathBuf>,
    en_dialogue: Option<PathBuf>,
    description: String,
}

impl EventRecordBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            month: None,
            day: None,
            weekday_label: String::new(),
            time_slot: TimeSlot::Unspecified,
            location: String::new(),
            conditions: String::new(),
            kr_dialogue: None,
            en_dialogue: None,
            description: String::new(),
        }
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Set month and day together
    pub fn date(mut self, month: u32, day: u32) -> Self {
        self.month = Some(month);
        self.day = Some(day);
        self
    }

    pub fn weekday_label(mut self, label: impl Into<String>) -> Self {
        self.weekday_label = label.into();
        self
    }

    pub fn time_slot(mut self, slot: TimeSlot) -> Self {
        self.time_slot = slot;
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn conditions(mut self, conditions: impl Into<String>) -> Self {
        self.conditions = conditions.into();
        self
    }

    /// Set both dialogue paths
    pub fn dialogue(mut self, kr: impl Into<PathBuf>, en: impl Into<PathBuf>) -> Self {
        self.kr_dialogue = Some(kr.into());
        self.en_dialogue = Some(en.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Build the record
    pub fn build(self) -> Result<EventRecord, String> {
        let id = self.id.ok_or("Event id is required")?;
        let month = self.month.ok_or("Event month is required")?;
        let day = self.day.ok_or("Event day is required")?;
        let kr_dialogue = self.kr_dialogue.ok_or("KR dialogue path is required")?;
        let en_dialogue = self.en_dialogue.ok_or("EN dialogue path is required")?;

        if !(1..=12).contains(&month) {
            return Err(format!("Month {} is out of range", month));
        }

        Ok(EventRecord {
            id,
            month,
            day,
            weekday_label: self.weekday_label,
            time_slot: self.time_slot,
            location: self.location,
            conditions: self.conditions,
            kr_dialogue,
            en_dialogue,
            description: self.description,
        })
    }
}

impl Default for EventRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}
