//! Duel configuration loaded from TOML.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Who makes the local moves.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlayerKind {
    /// Moves typed on stdin.
    #[default]
    Human,
    /// The first-free-cell AI.
    Ai,
}

/// Settings for one run of the program.
///
/// Every field has a default, so an empty or missing file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DuelConfig {
    /// Host to listen on or connect to.
    host: String,

    /// TCP port to listen on or connect to.
    port: u16,

    /// Who plays locally.
    player: PlayerKind,

    /// Pause before the AI answers, in milliseconds.
    ai_delay_ms: u64,

    /// Whether to style the board with terminal colors.
    color: bool,

    /// Tracing filter used when `RUST_LOG` is unset.
    log_filter: String,

    /// Write logs here instead of stderr.
    log_file: Option<PathBuf>,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8888,
            player: PlayerKind::Human,
            ai_delay_ms: 500,
            color: true,
            log_filter: "warn".to_string(),
            log_file: None,
        }
    }
}

impl DuelConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces the host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Replaces the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Replaces the local player kind.
    pub fn with_player(mut self, player: PlayerKind) -> Self {
        self.player = player;
        self
    }

    /// Turns terminal colors off.
    pub fn without_color(mut self) -> Self {
        self.color = false;
        self
    }

    /// `host:port`, ready for `ToSocketAddrs`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
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
