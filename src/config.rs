//! Engine configuration.

use crate::games::morpion::BoardSize;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Timing and default settings for the game engine.
///
/// Every key is optional in the TOML file; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seconds without a move before a game times out.
    turn_timeout_secs: u64,

    /// Pause before the AI plays, in milliseconds.
    ai_delay_ms: u64,

    /// Window in which a repeated click on the same cell is dropped, in milliseconds.
    debounce_ms: u64,

    /// How often the timeout sweeper runs, in seconds.
    sweep_interval_secs: u64,

    /// Board size used when a request does not name one.
    default_board_size: BoardSize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            turn_timeout_secs: 600,
            ai_delay_ms: 1200,
            debounce_ms: 3000,
            sweep_interval_secs: 30,
            default_board_size: BoardSize::Three,
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

        let config = Self::from_toml(&content)?;
        info!(
            turn_timeout_secs = config.turn_timeout_secs,
            ai_delay_ms = config.ai_delay_ms,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        if config.sweep_interval_secs == 0 {
            return Err(ConfigError::new(
                "sweep_interval_secs must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }

    /// Renders the configuration as TOML.
    #[instrument(skip(self))]
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }

    /// Sets the turn timeout.
    pub fn with_turn_timeout(mut self, timeout: Duration) -> Self {
        self.turn_timeout_secs = timeout.as_secs();
        self
    }

    /// Sets the AI thinking delay.
    pub fn with_ai_delay(mut self, delay: Duration) -> Self {
        self.ai_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Turn timeout as a [`Duration`].
    pub fn turn_timeout(&self) -> Duration {
        Duration::from_secs(self.turn_timeout_secs)
    }

    /// AI thinking delay as a [`Duration`].
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }

    /// Debounce window as a [`Duration`].
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Sweeper period as a [`Duration`].
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
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
