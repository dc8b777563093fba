// src/models/mod.rs

//! Domain models for the profile-views tool.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod count;
mod history;
mod snapshot;

// Re-export all public types
pub use config::{BadgeConfig, Config, FetchConfig, HistoryConfig, PathsConfig, RecoveryPolicy};
pub use count::Count;
pub use history::{History, HistoryEntry};
pub use snapshot::Snapshot;
