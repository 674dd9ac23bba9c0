//! Dialogue workspace discovery.
//!
//! A workspace root must contain `eventlist.csv` plus the `KR/` and `EN/`
//! trees. Month folders are the `KR/` subdirectories named by month
//! abbreviation.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::models::language::Language;
use crate::models::settings::AppConfig;
use crate::utils::date::MONTH_ABBREVS;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Workspace root {0:?} is not a directory")]
    NotADirectory(PathBuf),
    #[error("No eventlist.csv in {0:?}")]
    MissingEventList(PathBuf),
    #[error("Missing {lang} folder at {path:?}")]
    MissingLanguageDir { lang: Language, path: PathBuf },
}

/// A month directory under `KR/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthFolder {
    pub name: String,
    pub month: u32,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, WorkspaceError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(WorkspaceError::NotADirectory(root));
        }
        if !root.join(AppConfig::EVENT_LIST_FILE).is_file() {
            return Err(WorkspaceError::MissingEventList(root));
        }
        for lang in Language::ALL {
            let path = root.join(lang.dir_name());
            if !path.is_dir() {
                return Err(WorkspaceError::MissingLanguageDir { lang, path });
            }
        }

        log::info!("Opened dialogue workspace {:?}", root);
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> AppConfig {
        AppConfig::new(&self.root)
    }

    /// Month folders under `KR/`, ordered by month. Other folders are ignored.
    pub fn month_folders(&self) -> Vec<MonthFolder> {
        let kr_root = self.root.join(Language::Kr.dir_name());
        let mut folders: Vec<MonthFolder> = WalkDir::new(&kr_root)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping unreadable entry under {:?}: {}", kr_root, e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_dir())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                let month = MONTH_ABBREVS
                    .iter()
                    .position(|abbrev| abbrev.eq_ignore_ascii_case(&name))?;
                Some(MonthFolder {
                    name,
                    month: month as u32 + 1,
                    path: entry.into_path(),
                })
            })
            .collect();

        folders.sort_by_key(|folder| folder.month);
        folders
    }
}
