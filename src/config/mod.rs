//! Configuration management for the leaderboard core
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values.

pub mod app;
pub mod games;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings, ShareSettings, StorageSettings};
pub use games::{GameSettings, MergePolicy};
