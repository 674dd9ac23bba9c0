//! Edit session for adding or changing a single event.
//!
//! A session is opened with a snapshot of the record (or a blank draft), edited
//! through setters, and resolved exactly once as saved, deleted or cancelled.
//! The outcome travels over a oneshot channel; dropping an unresolved session
//! reports [`EditOutcome::None`].

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Weekday;
use tokio::sync::oneshot;

use crate::models::event::EventRecord;
use crate::models::language::Language;
use crate::models::time_slot::TimeSlot;
use crate::services::dialogue::{ConfirmOverwrite, DialoguePaths, DialogueSync, FileAction, SyncReport};
use crate::utils::date::weekday_label;

pub mod draft;

pub use draft::EditDraft;

/// How an edit session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The rewritten record to store.
    Saved(EventRecord),
    /// The record (as it was when editing began) to remove.
    Deleted(EventRecord),
    Cancelled,
    /// The session was dropped without an explicit action.
    None,
}

impl EditOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            EditOutcome::Saved(_) => "Saved",
            EditOutcome::Deleted(_) => "Deleted",
            EditOutcome::Cancelled => "Cancelled",
            EditOutcome::None => "None",
        }
    }
}

impl fmt::Display for EditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Caller side of a session; awaited once for the outcome.
pub struct SessionHandle {
    receiver: oneshot::Receiver<EditOutcome>,
}

impl SessionHandle {
    /// Suspends until the session resolves or is dropped.
    pub async fn outcome(self) -> EditOutcome {
        self.receiver.await.unwrap_or(EditOutcome::None)
    }
}

pub struct EditSession {
    root: PathBuf,
    first_weekday: Weekday,
    draft: EditDraft,
    /// Record as it was when editing began; `None` for a new event.
    original: Option<EventRecord>,
    completion: Option<oneshot::Sender<EditOutcome>>,
}

impl EditSession {
    /// Session for a new event on `month`/`day`.
    pub fn for_new(
        root: impl Into<PathBuf>,
        id: i64,
        month: u32,
        day: u32,
        first_weekday: Weekday,
    ) -> (Self, SessionHandle) {
        Self::open(root.into(), first_weekday, EditDraft::blank(id, month, day, first_weekday), None)
    }

    /// Session editing a snapshot of an existing record.
    pub fn for_record(
        root: impl Into<PathBuf>,
        record: &EventRecord,
        first_weekday: Weekday,
    ) -> (Self, SessionHandle) {
        Self::open(
            root.into(),
            first_weekday,
            EditDraft::from_record(record),
            Some(record.clone()),
        )
    }

    fn open(
        root: PathBuf,
        first_weekday: Weekday,
        draft: EditDraft,
        original: Option<EventRecord>,
    ) -> (Self, SessionHandle) {
        let (sender, receiver) = oneshot::channel();
        let session = Self {
            root,
            first_weekday,
            draft,
            original,
            completion: Some(sender),
        };
        (session, SessionHandle { receiver })
    }

    pub fn draft(&self) -> &EditDraft {
        &self.draft
    }

    pub fn id(&self) -> i64 {
        self.draft.id
    }

    pub fn is_new(&self) -> bool {
        self.original.is_none()
    }

    pub fn original(&self) -> Option<&EventRecord> {
        self.original.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.completion.is_none()
    }

    pub fn set_month(&mut self, month: &str) {
        self.draft.month = match month.trim().parse::<u32>() {
            Ok(number) => draft::month_text(number),
            Err(_) => month.trim().to_string(),
        };
    }

    /// Changing the day also re-derives the weekday label.
    pub fn set_day(&mut self, day: &str) {
        self.draft.day = day.trim().to_string();
        if let Ok(number) = self.draft.day.parse::<u32>() {
            if number > 0 {
                self.draft.weekday_label = weekday_label(self.first_weekday, number).to_string();
            }
        }
    }

    pub fn set_weekday_label(&mut self, label: impl Into<String>) {
        self.draft.weekday_label = label.into();
    }

    pub fn set_time_slot(&mut self, slot: TimeSlot) {
        self.draft.time_slot = slot;
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.draft.location = location.into();
    }

    pub fn set_conditions(&mut self, conditions: impl Into<String>) {
        self.draft.conditions = conditions.into();
    }

    pub fn set_file_name(&mut self, file_name: impl Into<String>) {
        self.draft.file_name = file_name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    /// Where the dialogue files belong given the current field values.
    pub fn target_paths(&self) -> Result<DialoguePaths> {
        self.draft
            .paths(&self.root)
            .context("Dialogue paths cannot be resolved from the current fields")
    }

    /// Fresh existence check of a variant at its current target path.
    pub fn dialogue_exists(&self, lang: Language) -> bool {
        self.target_paths()
            .map(|paths| paths.get(lang).is_file())
            .unwrap_or(false)
    }

    /// Make sure a variant exists so an external editor can open it.
    ///
    /// Returns the path and whether the file was just created.
    pub fn open_variant<C: ConfirmOverwrite>(
        &self,
        lang: Language,
        sync: &DialogueSync<C>,
    ) -> Result<(PathBuf, bool)> {
        let paths = self.target_paths()?;
        let path = paths.get(lang).to_path_buf();
        let created = sync.ensure_file(&path)?;
        Ok((path, created))
    }

    /// Copy the KR variant over the EN one at the current target paths.
    pub fn copy_kr_to_en<C: ConfirmOverwrite>(&self, sync: &DialogueSync<C>) -> Result<FileAction> {
        let paths = self.target_paths()?;
        sync.copy_kr_to_en(&paths)
    }

    /// Move files whose target changed, then resolve as `Saved`.
    ///
    /// Returns `Ok(None)` if the session was already resolved. An error leaves
    /// the session open.
    pub fn save<C: ConfirmOverwrite>(&mut self, sync: &DialogueSync<C>) -> Result<Option<SyncReport>> {
        if self.is_resolved() {
            log::debug!("Ignoring save on resolved session for event {}", self.id());
            return Ok(None);
        }

        let record = self
            .draft
            .to_record(&self.root)
            .with_context(|| format!("Event {} cannot be saved", self.draft.id))?;

        let report = match &self.original {
            Some(original) => sync.reschedule(original, &record),
            None => SyncReport::default(),
        };
        if report.has_failures() {
            log::warn!("Event {} saved but some dialogue files did not move", record.id);
        }

        self.resolve(EditOutcome::Saved(record));
        Ok(Some(report))
    }

    /// Resolve as `Deleted`.
    ///
    /// A new event whose draft has no usable file name has nothing on disk or
    /// in the store, so it resolves as `Cancelled` instead.
    pub fn delete(&mut self) -> bool {
        let record = match &self.original {
            Some(original) => Some(original.clone()),
            None => self.draft.to_record(&self.root).ok(),
        };

        match record {
            Some(record) => self.resolve(EditOutcome::Deleted(record)),
            None => {
                log::debug!("Nothing to delete for new event {}", self.id());
                self.resolve(EditOutcome::Cancelled)
            }
        }
    }

    pub fn cancel(&mut self) -> bool {
        self.resolve(EditOutcome::Cancelled)
    }

    /// First resolution wins; later calls return `false`.
    fn resolve(&mut self, outcome: EditOutcome) -> bool {
        let Some(sender) = self.completion.take() else {
            log::debug!("Session for event {} already resolved, ignoring {}", self.id(), outcome);
            return false;
        };

        log::debug!("Session for event {} resolved as {}", self.id(), outcome);
        // The handle may already be gone; the outcome is simply unobserved then.
        let _ = sender.send(outcome);
        true
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
