use std::fs;

use anyhow::{Context, Result};

use super::shared::parse_row;
use super::EventStore;
use crate::models::event::EventRecord;

impl<'a> EventStore<'a> {
    /// Read every well-formed record, optionally restricted to one month.
    ///
    /// The header line is skipped; blank and malformed rows are dropped and
    /// logged at debug level.
    pub fn load(&self, month_filter: Option<u32>) -> Result<Vec<EventRecord>> {
        let contents = fs::read_to_string(self.csv_path)
            .with_context(|| format!("Failed to read event list {:?}", self.csv_path))?;

        let mut events = Vec::new();
        for (idx, line) in contents.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }

            match parse_row(line, self.root, month_filter) {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {}
                Err(reason) => {
                    log::debug!("Skipping event list line {}: {}", idx + 1, reason);
                }
            }
        }

        Ok(events)
    }

    /// Look up a single record by id.
    pub fn find(&self, id: i64) -> Result<Option<EventRecord>> {
        Ok(self.load(None)?.into_iter().find(|event| event.id == id))
    }
}

/// Id for the next new record: one past the current maximum, or 1.
pub fn next_id(events: &[EventRecord]) -> i64 {
    events.iter().map(|event| event.id).max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::dialogue::DialoguePaths;
    use std::path::Path;

    fn with_id(id: i64) -> EventRecord {
        let paths = DialoguePaths::resolve(Path::new("/w"), 1, 1, "x").unwrap();
        EventRecord::builder()
            .id(id)
            .date(1, 1)
            .dialogue(paths.kr, paths.en)
            .build()
            .unwrap()
    }

    #[test]
    fn test_next_id_empty() {
        assert_eq!(next_id(&[]), 1);
    }

    #[test]
    fn test_next_id_uses_max_not_len() {
        let events = vec![with_id(4), with_id(2), with_id(9)];
        assert_eq!(next_id(&events), 10);
    }

    #[test]
    fn test_month_filter_is_subset_of_full_load() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("eventlist.csv");
        fs::write(
            &csv,
            "id,month,day,date,time,location,conditions,dialogue,desc\n\
             1,3,5,a,Morning,r,,Mar/5/a,\n\
             2,4,5,a,Morning,r,,Apr/5/b,\n\
             3,3,9,a,Morning,r,,Mar/9/c,\n",
        )
        .unwrap();
        let store = EventStore::new(&csv, dir.path());

        let all = store.load(None).unwrap();
        for month in 1..=12 {
            let filtered = store.load(Some(month)).unwrap();
            let expected: Vec<EventRecord> =
                all.iter().filter(|e| e.month == month).cloned().collect();
            assert_eq!(filtered, expected, "month {}", month);
        }
    }

    #[test]
    fn test_find() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("eventlist.csv");
        fs::write(
            &csv,
            "id,month,day,date,time,location,conditions,dialogue,desc\n\
             7,6,1,a,Noon,r,,Jun/1/a,\n",
        )
        .unwrap();
        let store = EventStore::new(&csv, dir.path());

        assert_eq!(store.find(7).unwrap().map(|e| e.day), Some(1));
        assert!(store.find(8).unwrap().is_none());
    }
}
