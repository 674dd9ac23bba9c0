// Test fixtures - reusable workspaces and records
// Builds scratch dialogue workspaces in a temporary directory

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use dialogue_calendar::models::event::EventRecord;
use dialogue_calendar::models::time_slot::TimeSlot;
use dialogue_calendar::services::dialogue::DialoguePaths;
use tempfile::TempDir;

pub const HEADER: &str = "id,month,day,date,time,location,conditions,dialogue,desc";

/// A temporary workspace with `eventlist.csv`, `KR/` and `EN/`.
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    /// Empty event list plus both language folders.
    pub fn new() -> Self {
        Self::with_rows(&[])
    }

    /// Event list holding the given data rows after the header.
    pub fn with_rows(rows: &[&str]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("KR")).unwrap();
        fs::create_dir_all(dir.path().join("EN")).unwrap();

        let mut contents = String::from(HEADER);
        for row in rows {
            contents.push('\n');
            contents.push_str(row);
        }
        contents.push('\n');
        fs::write(dir.path().join("eventlist.csv"), contents).unwrap();

        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn csv_path(&self) -> PathBuf {
        self.root().join("eventlist.csv")
    }

    pub fn csv_contents(&self) -> String {
        fs::read_to_string(self.csv_path()).unwrap()
    }

    /// Write a dialogue file relative to the root, creating folders.
    pub fn write_dialogue(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }
}

/// Sample records
pub mod records {
    use super::*;

    /// Event `id` on `month`/`day` whose dialogue is `<file>.json`.
    pub fn on(root: &Path, id: i64, month: u32, day: u32, file: &str) -> EventRecord {
        let paths = DialoguePaths::resolve(root, month, day, file).unwrap();
        EventRecord::builder()
            .id(id)
            .date(month, day)
            .weekday_label("Monday")
            .time_slot(TimeSlot::Morning)
            .location("Room")
            .dialogue(paths.kr, paths.en)
            .description(format!("event {}", id))
            .build()
            .unwrap()
    }
}
