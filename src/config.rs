//! config
//!
//! Configuration schema and loading.
//!
//! # Locations
//!
//! Searched in order:
//! 1. `$REPOLENS_CONFIG` if set
//! 2. `<user config dir>/repolens/config.toml`
//!
//! A missing file is not an error; defaults apply. The credential is always
//! injected — from the `--token` flag, the `GITHUB_TOKEN` environment
//! variable, or this file — and is never baked into the binary.
//!
//! # Example
//!
//! ```toml
//! token = "ghp_xxx"
//! api_base = "https://github.example.com/api/v3"
//! primary_branch = "main"
//! ```

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the config file path.
pub const CONFIG_PATH_ENV: &str = "REPOLENS_CONFIG";

/// Environment variable consulted for the credential.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no config directory available")]
    NoConfigDir,
}

/// User-scope configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Personal access token
    pub token: Option<String>,

    /// API base URL override (GitHub Enterprise)
    pub api_base: Option<String>,

    /// Primary branch name pinned first when ordering branches
    pub primary_branch: Option<String>,
}

impl GlobalConfig {
    /// Resolve the config file path.
    ///
    /// `$REPOLENS_CONFIG` wins; otherwise the platform config dir.
    pub fn path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }
        dirs::config_dir()
            .map(|dir| dir.join("repolens").join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load configuration, or defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;
        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Write configuration to the canonical location, creating parent
    /// directories as needed.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.clone(),
                source: e,
            })?;
        }
        let contents = toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            message: e.to_string(),
        })?;
        fs::write(&path, contents).map_err(|e| ConfigError::WriteError {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }
}
