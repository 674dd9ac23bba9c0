//! Dialogue file handling.
//! Path resolution for the mirrored KR/EN trees and the synchronizer that
//! moves, copies and deletes files as event records change.

pub mod confirm;
pub mod paths;
pub mod sync;

pub use confirm::{AlwaysOverwrite, ConfirmOverwrite, NeverOverwrite};
pub use paths::{DialoguePaths, PathError};
pub use sync::{DialogueSync, FileAction, SyncReport};
