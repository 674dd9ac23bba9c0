use std::path::Path;

/// Asked before any existing dialogue file is overwritten.
#[cfg_attr(test, mockall::automock)]
pub trait ConfirmOverwrite {
    fn confirm_overwrite(&self, path: &Path) -> bool;
}

/// Approves every overwrite. Used for `--yes` and scripted runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOverwrite;

impl ConfirmOverwrite for AlwaysOverwrite {
    fn confirm_overwrite(&self, path: &Path) -> bool {
        log::debug!("Overwrite of {} approved automatically", path.display());
        true
    }
}

/// Declines every overwrite.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverOverwrite;

impl ConfirmOverwrite for NeverOverwrite {
    fn confirm_overwrite(&self, path: &Path) -> bool {
        log::debug!("Overwrite of {} declined automatically", path.display());
        false
    }
}
