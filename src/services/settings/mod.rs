// Settings persistence

mod service;

pub use service::SettingsStore;
