//! Calendar event store entry point.
//! The flat CSV event list is the only persisted copy of the records; every
//! mutation reloads the file, edits the list in memory and rewrites it whole.

use std::path::Path;

use crate::models::settings::AppConfig;

pub mod crud;
pub mod queries;
mod shared;

pub use shared::RowError;

/// Service for reading and rewriting `eventlist.csv`.
pub struct EventStore<'a> {
    pub(crate) csv_path: &'a Path,
    /// Workspace root the dialogue paths are resolved against.
    pub(crate) root: &'a Path,
}

impl<'a> EventStore<'a> {
    pub fn new(csv_path: &'a Path, root: &'a Path) -> Self {
        Self { csv_path, root }
    }

    pub fn from_config(config: &'a AppConfig) -> Self {
        Self::new(&config.csv_path, &config.root)
    }

    pub fn csv_path(&self) -> &Path {
        self.csv_path
    }
}
