use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::api::AllowedOrigins;
use crate::config::types::{Config, ConfigOverrides};
use crate::store::StorageUrl;

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
    /// Uses `~/.config/counter-app/config.toml` on Linux, or the platform
    /// equivalent via `dirs::config_dir()`. Falls back to the current
    /// directory if no config dir is known.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("counter-app").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// A missing file is not an error: defaults are returned instead.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::read_default()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// Unlike [`Config::load`], a missing file is an error here.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::read_from(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `explicit` when given, else from the default location, then
    /// layer `overrides` on top and validate the result.
    ///
    /// File values replaced by an override are never validated.
    pub fn resolve(
        explicit: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::read_from(path)?,
            None => Self::read_default()?,
        };
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    fn read_default() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::read_from(&path)
    }

    /// Parse without validating.
    fn read_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Apply CLI/environment values over the file values.
    ///
    /// `port` keeps the host of `server.bind_addr` when one can be read from
    /// it, and falls back to all interfaces otherwise.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(port) = overrides.port {
            self.server.bind_addr = match self.bind_addr() {
                Ok(mut addr) => {
                    addr.set_port(port);
                    addr.to_string()
                }
                Err(_) => format!("0.0.0.0:{}", port),
            };
        }
        if let Some(origin) = &overrides.cors_origin {
            self.server.cors_origin = origin.clone();
        }
        if let Some(url) = &overrides.storage_url {
            self.storage.url = url.clone();
        }
        if let Some(url) = &overrides.api_url {
            self.client.api_url = url.clone();
        }
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The bind address is a socket address
    /// - The CORS value is `*` or a list of valid origins
    /// - The storage URL uses a known scheme
    /// - The API URL is http(s) and the client timeout is non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;

        AllowedOrigins::parse(&self.server.cors_origin).map_err(|message| {
            ConfigError::ValidationError { message }
        })?;

        self.storage
            .url
            .parse::<StorageUrl>()
            .map_err(|e| ConfigError::ValidationError {
                message: e.to_string(),
            })?;

        let api_url = &self.client.api_url;
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError {
                message: format!("API URL '{}' must start with http:// or https://", api_url),
            });
        }

        if self.client.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "client.timeout_seconds must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind_addr
            .parse()
            .map_err(|e| ConfigError::ValidationError {
                message: format!("Invalid bind address '{}': {}", self.server.bind_addr, e),
            })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.client.timeout_seconds))
    }
}
