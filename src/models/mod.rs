// Module exports for models

pub mod event;
pub mod language;
pub mod settings;
pub mod time_slot;
