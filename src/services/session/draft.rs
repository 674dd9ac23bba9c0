//! Editable form fields for an event and their coercion into a record.

use std::path::Path;

use chrono::Weekday;

use crate::models::event::EventRecord;
use crate::models::time_slot::TimeSlot;
use crate::services::dialogue::paths::{DialoguePaths, PathError};
use crate::utils::date::{month_abbrev, parse_month, weekday_label};

/// Default month/day when the entered text is not a number.
const FALLBACK_NUMBER: u32 = 1;

/// Text fields as the user edits them. Month and day stay as text until save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: i64,
    pub month: String,
    pub day: String,
    pub weekday_label: String,
    pub time_slot: TimeSlot,
    pub location: String,
    pub conditions: String,
    pub file_name: String,
    pub description: String,
}

impl EditDraft {
    /// Blank draft for a new event on `month`/`day`.
    pub fn blank(id: i64, month: u32, day: u32, first_weekday: Weekday) -> Self {
        Self {
            id,
            month: month_text(month),
            day: day.to_string(),
            weekday_label: weekday_label(first_weekday, day).to_string(),
            time_slot: TimeSlot::Morning,
            location: "Room".to_string(),
            conditions: String::new(),
            file_name: String::new(),
            description: String::new(),
        }
    }

    pub fn from_record(record: &EventRecord) -> Self {
        Self {
            id: record.id,
            month: month_text(record.month),
            day: record.day.to_string(),
            weekday_label: record.weekday_label.clone(),
            time_slot: record.time_slot,
            location: record.location.clone(),
            conditions: record.conditions.clone(),
            file_name: record.file_base(),
            description: record.description.clone(),
        }
    }

    /// Month as a number; unparseable text falls back to January.
    pub fn month_number(&self) -> u32 {
        parse_month(&self.month).unwrap_or(FALLBACK_NUMBER)
    }

    /// Day as a number; unparseable text falls back to 1.
    pub fn day_number(&self) -> u32 {
        self.day.trim().parse().unwrap_or(FALLBACK_NUMBER)
    }

    pub fn paths(&self, root: &Path) -> Result<DialoguePaths, PathError> {
        DialoguePaths::resolve(root, self.month_number(), self.day_number(), &self.file_name)
    }

    pub fn to_record(&self, root: &Path) -> Result<EventRecord, PathError> {
        let paths = self.paths(root)?;
        Ok(EventRecord {
            id: self.id,
            month: self.month_number(),
            day: self.day_number(),
            weekday_label: self.weekday_label.clone(),
            time_slot: self.time_slot,
            location: self.location.clone(),
            conditions: self.conditions.clone(),
            kr_dialogue: paths.kr,
            en_dialogue: paths.en,
            description: self.description.clone(),
        })
    }
}

/// Numeric months are shown as their abbreviation; anything else is kept.
pub(crate) fn month_text(month: u32) -> String {
    month_abbrev(month)
        .map(str::to_string)
        .unwrap_or_else(|| month.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn test_blank_defaults() {
        let draft = EditDraft::blank(2, 3, 12, Weekday::Sun);
        assert_eq!(draft.month, "Mar");
        assert_eq!(draft.weekday_label, "Thursday");
        assert_eq!(draft.time_slot, TimeSlot::Morning);
        assert_eq!(draft.location, "Room");
        assert!(draft.file_name.is_empty());
    }

    #[test]
    fn test_coercion_falls_back_to_one() {
        let mut draft = EditDraft::blank(1, 5, 5, Weekday::Sun);
        draft.month = "Smarch".to_string();
        draft.day = "fifth".to_string();
        assert_eq!(draft.month_number(), 1);
        assert_eq!(draft.day_number(), 1);
    }

    #[test]
    fn test_to_record_resolves_paths() {
        let mut draft = EditDraft::blank(4, 11, 2, Weekday::Sun);
        draft.file_name = "harvest.json".to_string();

        let record = draft.to_record(Path::new("/w")).unwrap();
        assert_eq!(record.kr_dialogue, PathBuf::from("/w/KR/Nov/2/harvest.json"));
        assert_eq!(record.en_dialogue, PathBuf::from("/w/EN/Nov/2/harvest.json"));
        assert_eq!(record.file_base(), "harvest");
    }

    #[test]
    fn test_to_record_needs_file_name() {
        let draft = EditDraft::blank(4, 11, 2, Weekday::Sun);
        assert_eq!(draft.to_record(Path::new("/w")), Err(PathError::EmptyFileBase));
    }
}
