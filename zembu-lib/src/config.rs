//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files and merging
//! configurations with proper precedence rules. Discovery order (lowest to
//! highest precedence): `$XDG_CONFIG_HOME/zembu/config.toml`,
//! `~/.zembu.toml`, `./.zembu.toml`. Environment variables and CLI flags
//! are layered on top by the CLI.

use crate::error::ZembuError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration loaded from TOML files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Default values for CLI options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

/// Default configuration values that map to CLI options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Default TLD list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tlds: Option<Vec<String>>,

    /// Default maximum lookups per second
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_per_second: Option<u32>,

    /// Default per-lookup timeout (as string, e.g. "15s", "2m")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// Default bounded retry count for failed lookups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,

    /// Default log file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,

    /// Default verbose setting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
}

/// Configuration sourced from `ZEMBU_*` environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub tlds: Option<Vec<String>>,
    pub rate_per_second: Option<u32>,
    pub timeout: Option<String>,
    pub retries: Option<u32>,
    pub log_file: Option<String>,
}

/// Load configuration from environment variables.
///
/// Unparseable numeric values are ignored with a warning rather than
/// aborting; the CLI layer validates the final merged values.
pub fn load_env_config() -> EnvConfig {
    let mut config = EnvConfig::default();

    if let Ok(tlds) = env::var("ZEMBU_TLDS") {
        config.tlds = Some(crate::utils::normalize_tlds(&tlds));
    }

    if let Ok(rate) = env::var("ZEMBU_RATE") {
        match rate.parse::<u32>() {
            Ok(parsed) => config.rate_per_second = Some(parsed),
            Err(_) => tracing::warn!("ignoring unparseable ZEMBU_RATE={}", rate),
        }
    }

    if let Ok(timeout) = env::var("ZEMBU_TIMEOUT") {
        config.timeout = Some(timeout);
    }

    if let Ok(retries) = env::var("ZEMBU_RETRIES") {
        match retries.parse::<u32>() {
            Ok(parsed) => config.retries = Some(parsed),
            Err(_) => tracing::warn!("ignoring unparseable ZEMBU_RETRIES={}", retries),
        }
    }

    if let Ok(log_file) = env::var("ZEMBU_LOG_FILE") {
        config.log_file = Some(log_file);
    }

    config
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager;

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `ZembuError::FileError` if the file is missing or unreadable
    /// and `ZembuError::ConfigError` if it is not valid TOML.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, ZembuError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ZembuError::file_error(
                path.to_string_lossy(),
                "configuration file not found",
            ));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ZembuError::file_error(path.to_string_lossy(), e.to_string()))?;

        let config: FileConfig = toml::from_str(&content).map_err(|e| {
            ZembuError::config(format!("failed to parse '{}': {}", path.display(), e))
        })?;

        self.validate(&config)?;

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// Missing files are skipped silently; a present-but-invalid file is a
    /// hard error so a typo never silently reverts to defaults.
    pub fn discover_and_load(&self) -> Result<FileConfig, ZembuError> {
        let mut merged = FileConfig::default();

        // 1. XDG config (lowest precedence)
        if let Some(xdg_path) = self.xdg_config_path() {
            if xdg_path.exists() {
                tracing::debug!("loading config from {}", xdg_path.display());
                merged = Self::merge(merged, self.load_file(&xdg_path)?);
            }
        }

        // 2. Global config in the home directory
        if let Some(global_path) = self.global_config_path() {
            if global_path.exists() {
                tracing::debug!("loading config from {}", global_path.display());
                merged = Self::merge(merged, self.load_file(&global_path)?);
            }
        }

        // 3. Local config in the working directory (highest precedence)
        let local_path = PathBuf::from(".zembu.toml");
        if local_path.exists() {
            tracing::debug!("loading config from {}", local_path.display());
            merged = Self::merge(merged, self.load_file(&local_path)?);
        }

        Ok(merged)
    }

    /// Merge two configurations, with `overlay` winning field-wise.
    fn merge(base: FileConfig, overlay: FileConfig) -> FileConfig {
        let defaults = match (base.defaults, overlay.defaults) {
            (Some(base), Some(overlay)) => Some(DefaultsConfig {
                tlds: overlay.tlds.or(base.tlds),
                rate_per_second: overlay.rate_per_second.or(base.rate_per_second),
                timeout: overlay.timeout.or(base.timeout),
                retries: overlay.retries.or(base.retries),
                log_file: overlay.log_file.or(base.log_file),
                verbose: overlay.verbose.or(base.verbose),
            }),
            (base, overlay) => overlay.or(base),
        };

        FileConfig { defaults }
    }

    /// Validate a loaded configuration.
    fn validate(&self, config: &FileConfig) -> Result<(), ZembuError> {
        if let Some(defaults) = &config.defaults {
            if defaults.rate_per_second == Some(0) {
                return Err(ZembuError::config("rate_per_second must be at least 1"));
            }
        }
        Ok(())
    }

    fn xdg_config_path(&self) -> Option<PathBuf> {
        let base = env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("zembu").join("config.toml"))
    }

    fn global_config_path(&self) -> Option<PathBuf> {
        env::var("HOME")
            .ok()
            .map(|h| PathBuf::from(h).join(".zembu.toml"))
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
