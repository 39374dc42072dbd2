//! Client configuration.

use crate::reconcile::MergeOptions;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "STRICTLY_TILES_CONFIG";

/// Configuration for a tiles client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TilesConfig {
    /// Seat names, in turn order.
    #[serde(default = "default_players")]
    players: Vec<String>,

    /// Fixed acting player ID. Unset means pass-and-play.
    #[serde(default)]
    identity: Option<String>,

    /// Placement debounce window in milliseconds (0 disables).
    #[serde(default = "default_debounce_ms")]
    debounce_ms: u64,

    /// Deal random racks to seats that arrive without one.
    #[serde(default)]
    bootstrap_racks: bool,

    /// Seed for the tile bag.
    #[serde(default)]
    seed: Option<u64>,

    /// Word list, one word per line. Unset accepts every word.
    #[serde(default)]
    dictionary: Option<PathBuf>,

    /// Log file used while the terminal UI is running.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_players() -> Vec<String> {
    vec!["Player 1".to_string(), "Player 2".to_string()]
}

fn default_debounce_ms() -> u64 {
    8
}

fn default_log_file() -> PathBuf {
    PathBuf::from("strictly_tiles.log")
}

impl Default for TilesConfig {
    fn default() -> Self {
        Self {
            players: default_players(),
            identity: None,
            debounce_ms: default_debounce_ms(),
            bootstrap_racks: false,
            seed: None,
            dictionary: None,
            log_file: default_log_file(),
        }
    }
}

impl TilesConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(players = config.players.len(), "Config loaded successfully");
        Ok(config)
    }

    /// Loads from `path`, else from [`CONFIG_ENV`], else defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(path),
            Err(_) => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.players.is_empty() {
            return Err(ConfigError::new("At least one player is required".to_string()));
        }
        if let Some(identity) = &self.identity
            && !self.players.iter().any(|p| p == identity)
        {
            return Err(ConfigError::new(format!(
                "Identity {} is not one of the players",
                identity
            )));
        }
        Ok(())
    }

    /// Replaces the word list and seed where given.
    pub fn with_overrides(mut self, dictionary: Option<PathBuf>, seed: Option<u64>) -> Self {
        if dictionary.is_some() {
            self.dictionary = dictionary;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Debounce window.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Merge behaviour derived from this config.
    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            bootstrap_racks: self.bootstrap_racks,
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
