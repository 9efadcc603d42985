//! Configuration for the fader tool
//!
//! Only the tool's own settings live here (preferred backend, default
//! channel, nudge step). Volume state itself is never persisted; it lives in
//! the hardware registers.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Which hardware backend the tool talks to by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Alsa,
    Fake,
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend used when none is forced on the command line
    #[serde(default)]
    pub backend: BackendKind,

    /// Channel addressed when a command names none
    #[serde(default)]
    pub default_channel: Option<String>,

    /// Volume step used by `nudge` when no delta is given
    #[serde(default = "default_nudge_step")]
    pub nudge_step: i32,
}

fn default_nudge_step() -> i32 {
    2
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            default_channel: None,
            nudge_step: default_nudge_step(),
        }
    }
}

impl AppConfig {
    /// Default location of the config file (`<config dir>/fader/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fader").join("config.toml"))
    }

    /// Load configuration from a specific file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = toml::from_str(&raw)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from the default location, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load_or_default() -> Self {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path).unwrap_or_else(|e| {
                warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Write configuration to a specific file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }
}
