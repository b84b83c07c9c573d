use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::credentials::SecureString;
use crate::config::types::Config;

/// Service base URL override.
pub const ENV_BASE_URL: &str = "PRIOR_BASE_URL";
/// API key used for bearer authentication.
pub const ENV_API_KEY: &str = "PRIOR_API_KEY";
/// Request timeout override, in seconds.
pub const ENV_TIMEOUT_SECONDS: &str = "PRIOR_TIMEOUT_SECONDS";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/prior/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("prior").join("config.toml")
    }

    /// Loads the default config file, then applies process environment
    /// overrides and validates the result.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a specific file.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Apply environment overrides through `lookup`.
    ///
    /// Empty values are treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = Some(SecureString::new(key));
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECONDS) {
            self.timeout_seconds =
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::ValidationError {
                        message: format!("{ENV_TIMEOUT_SECONDS} must be a whole number, got '{raw}'"),
                    })?;
        }
        Ok(())
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The base URL is an absolute http(s) URL
    /// - Timeouts are non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| ConfigError::ValidationError {
            message: format!("Invalid base URL '{}': {e}", self.base_url),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError {
                message: format!("Base URL '{}' must use http or https", self.base_url),
            });
        }

        if self.timeout_seconds == 0 || self.connect_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "Timeouts must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}
