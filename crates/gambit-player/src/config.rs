//! Player configuration loading.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors from loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid configuration TOML.
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Configuration for the automated player.
///
/// ```toml
/// search_depth = 5
/// books = ["books/human.json", "books/gm2001.json"]
///
/// [tablebase]
/// endpoint = "http://tablebase.example/standard"
/// timeout_ms = 3000
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerConfig {
    /// Search depth in plies for the search fallback.
    #[serde(default = "default_search_depth")]
    pub search_depth: u8,

    /// Remote tablebase endpoint; omit to disable tablebase lookups.
    #[serde(default)]
    pub tablebase: Option<TablebaseConfig>,

    /// Opening book files, tried in order.
    #[serde(default)]
    pub books: Vec<PathBuf>,
}

/// Remote tablebase settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TablebaseConfig {
    /// Base URL queried with the position FEN.
    pub endpoint: String,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_search_depth() -> u8 {
    5
}

fn default_timeout_ms() -> u64 {
    3000
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            search_depth: default_search_depth(),
            tablebase: None,
            books: Vec::new(),
        }
    }
}

impl PlayerConfig {
    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}
