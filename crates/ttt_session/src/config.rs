//! Engine configuration loaded from TOML.

use crate::settings::{PlayMode, SessionSettings};
use crate::store::{KeyValueStore, MemoryStore, SqliteStore, StorageError};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};
use ttt_core::{Difficulty, Mark};

/// Startup configuration for a session.
///
/// Every field is optional in the file; missing fields default to computer
/// mode with the human on X at hard difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Play mode at startup.
    #[serde(default)]
    mode: PlayMode,

    /// Mark the human plays in computer mode.
    #[serde(default)]
    human_mark: Mark,

    /// Computer strength.
    #[serde(default)]
    difficulty: Difficulty,

    /// Pause before the computer answers a human move, in milliseconds.
    #[serde(default = "default_move_delay_ms")]
    move_delay_ms: u64,

    /// Pause before the computer opens a fresh game, in milliseconds.
    #[serde(default = "default_opening_delay_ms")]
    opening_delay_ms: u64,

    /// Seed for the computer's random choices. Random when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// SQLite file for scores and preferences. In-memory when absent.
    #[serde(default)]
    database_path: Option<PathBuf>,
}

#[instrument]
fn default_move_delay_ms() -> u64 {
    180
}

#[instrument]
fn default_opening_delay_ms() -> u64 {
    250
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: PlayMode::default(),
            human_mark: Mark::default(),
            difficulty: Difficulty::default(),
            move_delay_ms: default_move_delay_ms(),
            opening_delay_ms: default_opening_delay_ms(),
            seed: None,
            database_path: None,
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!(mode = ?config.mode, difficulty = %config.difficulty, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Session settings described by this config.
    pub fn settings(&self) -> SessionSettings {
        SessionSettings::new(self.mode, self.human_mark, self.difficulty)
    }

    /// Delay before the computer answers a human move.
    pub fn move_delay(&self) -> Duration {
        Duration::from_millis(self.move_delay_ms)
    }

    /// Delay before the computer opens a fresh game.
    pub fn opening_delay(&self) -> Duration {
        Duration::from_millis(self.opening_delay_ms)
    }

    /// Opens the configured store: SQLite if a database path is set,
    /// otherwise a fresh in-memory store.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database cannot be opened.
    #[instrument(skip(self))]
    pub fn open_store(&self) -> Result<Box<dyn KeyValueStore>, StorageError> {
        match &self.database_path {
            Some(path) => {
                let path = path
                    .to_str()
                    .ok_or_else(|| StorageError::new(format!("Non UTF-8 database path: {}", path.display())))?;
                Ok(Box::new(SqliteStore::open(path)?))
            }
            None => {
                debug!("No database path configured, using in-memory store");
                Ok(Box::new(MemoryStore::new()))
            }
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = EngineConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.move_delay(), Duration::from_millis(180));
        assert_eq!(config.opening_delay(), Duration::from_millis(250));
        assert_eq!(*config.difficulty(), Difficulty::Hard);
    }

    #[test]
    fn test_parses_all_fields() {
        let config = EngineConfig::from_toml_str(
            r#"
            mode = "pvp"
            human_mark = "O"
            difficulty = "normal"
            move_delay_ms = 10
            opening_delay_ms = 20
            seed = 99
            database_path = "scores.db"
            "#,
        )
        .expect("valid config");
        assert_eq!(
            config.settings(),
            SessionSettings::new(PlayMode::TwoPlayer, Mark::O, Difficulty::Normal)
        );
        assert_eq!(*config.seed(), Some(99));
        assert_eq!(config.database_path().as_deref(), Some(Path::new("scores.db")));
    }

    #[test]
    fn test_rejects_unknown_difficulty() {
        let err = EngineConfig::from_toml_str(r#"difficulty = "impossible""#).unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }
}
