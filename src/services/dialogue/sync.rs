use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::event::EventRecord;
use crate::models::language::Language;

use super::confirm::ConfirmOverwrite;
use super::paths::{meta_path, with_json_extension, DialoguePaths};

/// Contents written when a dialogue variant is created on demand.
pub const EMPTY_DIALOGUE: &str = "{}";

/// What happened to one language variant during a sync step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAction {
    Moved,
    Removed,
    Copied,
    /// Source and destination are the same path.
    Unchanged,
    /// Nothing on disk to act on; not an error.
    SourceMissing,
    /// The destination existed and the overwrite was not approved.
    Declined,
    Failed(String),
}

/// Per-language outcome of a synchronizer call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub actions: Vec<(Language, FileAction)>,
}

impl SyncReport {
    pub fn action(&self, lang: Language) -> Option<&FileAction> {
        self.actions
            .iter()
            .find(|(entry_lang, _)| *entry_lang == lang)
            .map(|(_, action)| action)
    }

    pub fn has_failures(&self) -> bool {
        self.actions
            .iter()
            .any(|(_, action)| matches!(action, FileAction::Failed(_)))
    }

    fn push(&mut self, lang: Language, action: FileAction) {
        self.actions.push((lang, action));
    }
}

/// Keeps the KR and EN dialogue trees in step with record changes.
///
/// Filesystem failures on move and delete are logged and recorded in the
/// returned [`SyncReport`]; they never abort the caller's record update.
pub struct DialogueSync<C: ConfirmOverwrite> {
    confirm: C,
}

impl<C: ConfirmOverwrite> DialogueSync<C> {
    pub fn new(confirm: C) -> Self {
        Self { confirm }
    }

    /// Create the parent directory and an empty `{}` file if the variant is missing.
    ///
    /// Returns `true` when the file was created by this call.
    pub fn ensure_file(&self, path: &Path) -> Result<bool> {
        if path.is_file() {
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dialogue directory {:?}", parent))?;
        }
        fs::write(path, EMPTY_DIALOGUE)
            .with_context(|| format!("Failed to create dialogue file {:?}", path))?;

        log::info!("Created empty dialogue file {:?}", path);
        Ok(true)
    }

    /// Move both variants from a record's old date to its new date.
    pub fn reschedule(&self, before: &EventRecord, after: &EventRecord) -> SyncReport {
        let from = DialoguePaths {
            kr: before.kr_dialogue.clone(),
            en: before.en_dialogue.clone(),
        };
        let to = DialoguePaths {
            kr: after.kr_dialogue.clone(),
            en: after.en_dialogue.clone(),
        };
        self.reconcile(&from, &to)
    }

    /// Move each variant from the path it had when editing began to its
    /// resolved path. Missing sources are skipped.
    pub fn reconcile(&self, original: &DialoguePaths, target: &DialoguePaths) -> SyncReport {
        let mut report = SyncReport::default();

        for lang in Language::ALL {
            let from = with_json_extension(original.get(lang));
            let to = with_json_extension(target.get(lang));

            let action = match self.relocate(&from, &to) {
                Ok(action) => action,
                Err(e) => {
                    log::warn!("Failed to move {} dialogue {:?} -> {:?}: {:#}", lang, from, to, e);
                    FileAction::Failed(format!("{:#}", e))
                }
            };
            report.push(lang, action);
        }

        report
    }

    /// Remove both variants and their metadata. Failures are logged and swallowed.
    pub fn delete_files(&self, record: &EventRecord) -> SyncReport {
        let mut report = SyncReport::default();

        for lang in Language::ALL {
            let path = with_json_extension(record.dialogue_path(lang));
            if !path.is_file() {
                report.push(lang, FileAction::SourceMissing);
                continue;
            }

            let action = match fs::remove_file(&path) {
                Ok(()) => {
                    log::info!("Deleted {} dialogue {:?}", lang, path);
                    FileAction::Removed
                }
                Err(e) => {
                    log::warn!("Failed to delete {} dialogue {:?}: {}", lang, path, e);
                    FileAction::Failed(e.to_string())
                }
            };

            let meta = meta_path(&path);
            if meta.is_file() {
                if let Err(e) = fs::remove_file(&meta) {
                    log::warn!("Failed to delete dialogue metadata {:?}: {}", meta, e);
                }
            }

            report.push(lang, action);
        }

        report
    }

    /// Copy the KR variant over the EN variant.
    ///
    /// An existing EN file is only replaced after confirmation.
    pub fn copy_kr_to_en(&self, paths: &DialoguePaths) -> Result<FileAction> {
        let source = with_json_extension(&paths.kr);
        let target = with_json_extension(&paths.en);

        if !source.is_file() {
            log::debug!("Nothing to copy, {:?} does not exist", source);
            return Ok(FileAction::SourceMissing);
        }
        if target.exists() && !self.confirm.confirm_overwrite(&target) {
            return Ok(FileAction::Declined);
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dialogue directory {:?}", parent))?;
        }
        fs::copy(&source, &target)
            .with_context(|| format!("Failed to copy {:?} to {:?}", source, target))?;

        log::info!("Copied KR dialogue {:?} to {:?}", source, target);
        Ok(FileAction::Copied)
    }

    fn relocate(&self, from: &Path, to: &Path) -> Result<FileAction> {
        if from == to {
            return Ok(FileAction::Unchanged);
        }
        if !from.is_file() {
            return Ok(FileAction::SourceMissing);
        }
        if to.exists() && !self.confirm.confirm_overwrite(to) {
            log::warn!("Kept {:?} in place, overwrite of {:?} was declined", from, to);
            return Ok(FileAction::Declined);
        }

        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dialogue directory {:?}", parent))?;
        }
        move_file(from, to)?;

        let from_meta = meta_path(from);
        if from_meta.is_file() {
            let to_meta = meta_path(to);
            if let Err(e) = move_file(&from_meta, &to_meta) {
                log::warn!("Dialogue moved but its metadata {:?} did not: {:#}", from_meta, e);
            }
        }

        log::info!("Moved dialogue {:?} -> {:?}", from, to);
        Ok(FileAction::Moved)
    }
}

/// Rename, falling back to copy + remove when the rename crosses devices.
fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }

    fs::copy(from, to).with_context(|| format!("Failed to copy {:?} to {:?}", from, to))?;
    fs::remove_file(from).with_context(|| format!("Failed to remove {:?} after copy", from))?;
    Ok(())
}
