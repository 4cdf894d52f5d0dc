//! Main application configuration
//!
//! This module defines the configuration structures for the leaderboard
//! core and CLI, including environment variable loading, TOML files and
//! validation.

use crate::config::games::GameSettings;
use crate::error::LeaderboardError;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub storage: StorageSettings,
    pub games: GameSettings,
    pub share: ShareSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name used in log output
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Local key-value storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// File backing the key-value store
    pub data_file: PathBuf,
    /// Key holding the serialized leaderboard collection
    pub leaderboards_key: String,
    /// Key holding the recent player-name history
    pub player_names_key: String,
}

/// Share-text settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareSettings {
    /// Origin used to build the trailing leaderboard link
    pub base_url: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "universal-leaderboard".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("leaderboards.json"),
            leaderboards_key: "universal_leaderboards".to_string(),
            player_names_key: "tictactoe_player_names".to_string(),
        }
    }
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::from_toml_str(&contents)?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Parse a TOML document; missing sections and fields take their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| anyhow!("Invalid config file: {}", e))?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Storage settings
        if let Ok(path) = env::var("LEADERBOARD_DATA_FILE") {
            self.storage.data_file = PathBuf::from(path);
        }
        if let Ok(key) = env::var("LEADERBOARD_STORAGE_KEY") {
            self.storage.leaderboards_key = key;
        }

        // Game settings
        if let Ok(policy) = env::var("GAME_MERGE_POLICY") {
            self.games.merge_policy = policy
                .parse()
                .map_err(|_| invalid_env("GAME_MERGE_POLICY", &policy))?;
        }
        if let Ok(max_entries) = env::var("MAX_GAME_ENTRIES") {
            self.games.max_game_entries = max_entries
                .parse()
                .map_err(|_| invalid_env("MAX_GAME_ENTRIES", &max_entries))?;
        }
        if let Ok(limit) = env::var("RECENT_NAMES_LIMIT") {
            self.games.recent_names_limit = limit
                .parse()
                .map_err(|_| invalid_env("RECENT_NAMES_LIMIT", &limit))?;
        }

        if let Ok(url) = env::var("SHARE_BASE_URL") {
            self.share.base_url = url;
        }

        Ok(())
    }
}

fn invalid_env(var: &str, value: &str) -> LeaderboardError {
    LeaderboardError::ConfigurationError {
        message: format!("Invalid {} value: {}", var, value),
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.storage.data_file.as_os_str().is_empty() {
        return Err(anyhow!("Data file path cannot be empty"));
    }
    if config.storage.leaderboards_key.is_empty() {
        return Err(anyhow!("Leaderboards storage key cannot be empty"));
    }
    if config.storage.player_names_key.is_empty() {
        return Err(anyhow!("Player names storage key cannot be empty"));
    }
    if config.storage.leaderboards_key == config.storage.player_names_key {
        return Err(anyhow!(
            "Leaderboards and player names must use different storage keys"
        ));
    }

    if config.games.max_game_entries == 0 {
        return Err(anyhow!("Max game entries must be greater than 0"));
    }

    if config.share.base_url.trim().is_empty() {
        return Err(anyhow!("Share base URL cannot be empty"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::games::MergePolicy;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.storage.leaderboards_key, "universal_leaderboards");
        assert_eq!(config.games.max_game_entries, 100);
        assert_eq!(config.games.merge_policy, MergePolicy::MergeIfHigher);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [games]
            merge_policy = "always_append"
            max_game_entries = 25
            "#,
        )
        .unwrap();

        assert_eq!(config.games.merge_policy, MergePolicy::AlwaysAppend);
        assert_eq!(config.games.max_game_entries, 25);
        assert_eq!(config.games.recent_names_limit, 10);
        assert_eq!(config.service.log_level, "info");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = AppConfig::default();
        config.service.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.games.max_game_entries = 0;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.storage.player_names_key = config.storage.leaderboards_key.clone();
        assert!(validate_config(&config).is_err());

        assert!(AppConfig::from_toml_str("[games]\nmerge_policy = \"sometimes\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[share]\nbase_url = \"https://scores.example\"\n[service]\nlog_level = \"debug\""
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.share.base_url, "https://scores.example");
        assert_eq!(config.service.log_level, "debug");
    }
}
