use std::fs;

use anyhow::{anyhow, Context, Result};

use super::shared::{format_row, HEADER};
use super::EventStore;
use crate::models::event::EventRecord;

impl<'a> EventStore<'a> {
    /// Rewrite the whole file: header, then one row per record in ascending id.
    ///
    /// There is no write-then-rename step; a failure part way through can
    /// leave the file truncated.
    pub fn save(&self, events: &[EventRecord]) -> Result<()> {
        let mut sorted: Vec<&EventRecord> = events.iter().collect();
        sorted.sort_by_key(|event| event.id);

        let mut data = String::with_capacity(64 * (sorted.len() + 1));
        data.push_str(HEADER);
        data.push('\n');
        for event in sorted {
            let row = format_row(event)
                .with_context(|| format!("Failed to encode event {}", event.id))?;
            data.push_str(&row);
            data.push('\n');
        }

        if let Some(parent) = self.csv_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(self.csv_path, data)
            .with_context(|| format!("Failed to write event list {:?}", self.csv_path))?;

        log::debug!("Wrote {} events to {:?}", events.len(), self.csv_path);
        Ok(())
    }

    /// Append a new record and rewrite the list.
    pub fn insert(&self, event: EventRecord) -> Result<()> {
        let mut events = self.load(None)?;
        if events.iter().any(|existing| existing.id == event.id) {
            return Err(anyhow!("Event with id {} already exists", event.id));
        }
        events.push(event);
        self.save(&events)
    }

    /// Replace the record with the same id (remove, then insert the rewritten one).
    pub fn replace(&self, event: EventRecord) -> Result<()> {
        let mut events = self.load(None)?;
        let before = events.len();
        events.retain(|existing| existing.id != event.id);
        if events.len() == before {
            return Err(anyhow!("Event with id {} not found", event.id));
        }
        events.push(event);
        self.save(&events)
    }

    /// Drop a record by id. Returns the removed record.
    pub fn remove(&self, id: i64) -> Result<EventRecord> {
        let mut events = self.load(None)?;
        let idx = events
            .iter()
            .position(|event| event.id == id)
            .ok_or_else(|| anyhow!("Event with id {} not found", id))?;
        let removed = events.remove(idx);
        self.save(&events)?;
        Ok(removed)
    }
}
