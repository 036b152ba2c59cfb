//! Configuration for the viewer

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::document::LoadMode;
use crate::editor::Keymap;
use crate::input::DEFAULT_ESCAPE_TIMEOUT_MS;

/// Viewer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Load every line of the file instead of just the first
    pub load_all_lines: bool,
    /// Move the cursor with h/j/k/l as well as the arrow keys
    pub vi_keys: bool,
    /// How long to wait for the rest of an escape sequence
    pub escape_timeout_ms: u64,
    /// Append logs to this file instead of standard error
    pub log_file: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            load_all_lines: false,
            vi_keys: false,
            escape_timeout_ms: DEFAULT_ESCAPE_TIMEOUT_MS,
            log_file: None,
            log_filter: "error".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load `~/.config/gilo/config.json`, or the defaults if there is none
    ///
    /// A config file that exists but does not parse is an error rather than
    /// being silently ignored.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// How much of the document to load
    pub fn load_mode(&self) -> LoadMode {
        if self.load_all_lines {
            LoadMode::AllLines
        } else {
            LoadMode::FirstLine
        }
    }

    /// Key handling options for the editor
    pub fn keymap(&self) -> Keymap {
        Keymap {
            vi_keys: self.vi_keys,
        }
    }
}

/// Get the default configuration file path
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("gilo")
            .join("config.json")
    })
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
