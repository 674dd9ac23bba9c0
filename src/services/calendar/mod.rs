// Calendar service
// Month view, edit sessions and applying their outcomes to the event list

use anyhow::{anyhow, Context, Result};
use chrono::Weekday;

use crate::models::event::EventRecord;
use crate::models::settings::{AppConfig, CalendarSettings};
use crate::services::dialogue::{ConfirmOverwrite, DialogueSync};
use crate::services::event::queries::next_id;
use crate::services::event::EventStore;
use crate::services::grid::{self, DayCell};
use crate::services::session::{EditOutcome, EditSession, SessionHandle};
use crate::services::settings::SettingsStore;
use crate::utils::date::{month_abbrev, parse_month};

/// A generated month grid plus what it was generated with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub month: u32,
    pub abbrev: &'static str,
    pub year: i32,
    pub first_weekday: Weekday,
    pub days: Vec<DayCell>,
}

pub struct CalendarService<C: ConfirmOverwrite> {
    config: AppConfig,
    settings: CalendarSettings,
    sync: DialogueSync<C>,
    settings_store: Option<SettingsStore>,
}

impl<C: ConfirmOverwrite> CalendarService<C> {
    pub fn new(config: AppConfig, settings: CalendarSettings, confirm: C) -> Self {
        Self {
            config,
            settings,
            sync: DialogueSync::new(confirm),
            settings_store: None,
        }
    }

    /// Persist settings changes made by [`show_month`](Self::show_month).
    pub fn with_settings_store(mut self, store: SettingsStore) -> Self {
        self.settings_store = Some(store);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn settings(&self) -> &CalendarSettings {
        &self.settings
    }

    pub fn sync(&self) -> &DialogueSync<C> {
        &self.sync
    }

    fn store(&self) -> EventStore<'_> {
        EventStore::from_config(&self.config)
    }

    /// All records, or an empty list when the event list does not exist yet.
    fn load_or_empty(&self, month_filter: Option<u32>) -> Result<Vec<EventRecord>> {
        if !self.config.csv_path.exists() {
            log::warn!(
                "Event list {:?} not found, treating it as empty",
                self.config.csv_path
            );
            return Ok(Vec::new());
        }
        self.store().load(month_filter)
    }

    pub fn list(&self, month_filter: Option<u32>) -> Result<Vec<EventRecord>> {
        self.load_or_empty(month_filter)
    }

    /// Build the grid for a month.
    ///
    /// The first weekday comes from `first_weekday_override`, else the saved
    /// settings, else Sunday. The choice is remembered in the settings.
    pub fn show_month(
        &mut self,
        month_name: &str,
        first_weekday_override: Option<Weekday>,
    ) -> Result<MonthView> {
        let month = parse_month(month_name)
            .ok_or_else(|| anyhow!("Unknown month {:?}", month_name))?;
        let abbrev = month_abbrev(month).ok_or_else(|| anyhow!("Unknown month {}", month))?;

        let first_weekday =
            first_weekday_override.unwrap_or_else(|| self.settings.first_weekday(abbrev));

        let records = self.load_or_empty(None)?;
        let days = grid::generate(month, self.config.year, &records, first_weekday)?;

        self.settings.set_first_weekday(abbrev, first_weekday);
        if let Some(store) = &self.settings_store {
            if let Err(e) = store.save(&self.settings) {
                log::warn!("Failed to save settings: {:#}", e);
            }
        }

        log::info!(
            "Showing {} {} starting on {:?} with {} events",
            abbrev,
            self.config.year,
            first_weekday,
            days.iter().map(|cell| cell.events.len()).sum::<usize>()
        );

        Ok(MonthView {
            month,
            abbrev,
            year: self.config.year,
            first_weekday,
            days,
        })
    }

    /// Open a session for a new event on `month`/`day` with the next free id.
    pub fn begin_add(&self, month: u32, day: u32) -> Result<(EditSession, SessionHandle)> {
        let records = self.load_or_empty(None)?;
        let id = next_id(&records);
        let first_weekday = self.first_weekday_for(month);

        log::debug!("Adding event {} on {}/{}", id, month, day);
        Ok(EditSession::for_new(
            &self.config.root,
            id,
            month,
            day,
            first_weekday,
        ))
    }

    /// Open a session on a snapshot of record `id`, or `None` if it is unknown.
    pub fn begin_edit(&self, id: i64) -> Result<Option<(EditSession, SessionHandle)>> {
        let records = self.load_or_empty(None)?;
        let Some(record) = records.into_iter().find(|record| record.id == id) else {
            log::info!("No event with id {}", id);
            return Ok(None);
        };

        let first_weekday = self.first_weekday_for(record.month);
        Ok(Some(EditSession::for_record(
            &self.config.root,
            &record,
            first_weekday,
        )))
    }

    /// Wait for a session to resolve, then apply its outcome.
    pub async fn complete(&self, handle: SessionHandle) -> Result<EditOutcome> {
        let outcome = handle.outcome().await;
        self.apply(&outcome)?;
        Ok(outcome)
    }

    /// Write a session outcome to the event list and dialogue tree.
    pub fn apply(&self, outcome: &EditOutcome) -> Result<()> {
        match outcome {
            EditOutcome::Saved(record) => {
                let store = self.store();
                let result = if !self.config.csv_path.exists() {
                    store.save(std::slice::from_ref(record))
                } else if store.find(record.id)?.is_some() {
                    store.replace(record.clone())
                } else {
                    store.insert(record.clone())
                };
                result.with_context(|| format!("Failed to store event {}", record.id))?;
                log::info!("Saved event {}", record.id);
            }
            EditOutcome::Deleted(record) => {
                let report = self.sync.delete_files(record);
                if report.has_failures() {
                    log::warn!("Some dialogue files of event {} were not deleted", record.id);
                }

                let store = self.store();
                if self.config.csv_path.exists() && store.find(record.id)?.is_some() {
                    store
                        .remove(record.id)
                        .with_context(|| format!("Failed to remove event {}", record.id))?;
                }
                log::info!("Deleted event {}", record.id);
            }
            EditOutcome::Cancelled | EditOutcome::None => {
                log::debug!("Edit session ended without changes ({})", outcome);
            }
        }
        Ok(())
    }

    fn first_weekday_for(&self, month: u32) -> Weekday {
        month_abbrev(month)
            .map(|abbrev| self.settings.first_weekday(abbrev))
            .unwrap_or(Weekday::Sun)
    }
}
