// Service module exports

pub mod calendar;
pub mod dialogue;
pub mod event;
pub mod grid;
pub mod session;
pub mod settings;
pub mod workspace;
