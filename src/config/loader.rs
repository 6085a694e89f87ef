//! Configuration file loading with precedence handling.
//!
//! An optional TOML file overrides hardcoded defaults. A missing file is
//! not an error - the defaults stand; an unreadable or syntactically
//! invalid file is, so typos never silently fall back.

use crate::config::Config;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read an existing config file.
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown fields.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - unset fields take hardcoded defaults.
/// Corresponds to `<config_dir>/deskview/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Automated-reply delay in milliseconds.
    #[serde(default)]
    pub reply_delay_ms: Option<u64>,

    /// Remembered projections per derived view.
    #[serde(default)]
    pub view_cache_capacity: Option<usize>,

    /// Path for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

impl ConfigFile {
    /// Apply this file over the defaults.
    pub fn resolve(self) -> Config {
        let defaults = Config::default();
        Config {
            reply_delay_ms: self.reply_delay_ms.unwrap_or(defaults.reply_delay_ms),
            view_cache_capacity: self
                .view_cache_capacity
                .unwrap_or(defaults.view_cache_capacity),
            log_file_path: self.log_file_path.or(defaults.log_file_path),
        }
    }
}

/// Parse a config file from disk.
pub fn load_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    toml::from_str(&raw).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Resolve the effective configuration.
///
/// Precedence: explicit `path` argument, else the conventional location
/// (`<config_dir>/deskview/config.toml`), else hardcoded defaults when
/// neither file exists.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let candidate = match path {
        Some(p) => Some(p.to_path_buf()),
        None => default_config_path(),
    };

    match candidate {
        Some(p) if p.exists() => Ok(load_file(&p)?.resolve()),
        Some(p) if path.is_some() => Err(ConfigError::ReadError {
            path: p,
            reason: "file not found".to_string(),
        }),
        _ => Ok(Config::default()),
    }
}

/// Conventional config file location for this platform.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("deskview").join("config.toml"))
}
