use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

/// HTTP API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address (host:port).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Allowed cross-origin value: `*` or a comma-separated list of origins.
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

/// Durable store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Connection string: `memory://`, `file://<path>`, `redis://...`.
    #[serde(default = "default_storage_url")]
    pub url: String,
    /// Key prefix used by the redis backend.
    #[serde(default = "default_redis_prefix")]
    pub redis_prefix: String,
}

/// Terminal client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Public base URL of the HTTP API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per-request timeout in seconds (default: 10).
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u32,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3001".to_string()
}

fn default_cors_origin() -> String {
    "*".to_string()
}

/// `file://<data_dir>/counter-app/counter.json`, falling back to the
/// current directory when no data dir is known.
fn default_storage_url() -> String {
    let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    let path = data_dir.join("counter-app").join("counter.json");
    format!("file://{}", path.display())
}

fn default_redis_prefix() -> String {
    "counter".to_string()
}

fn default_api_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_timeout_seconds() -> u32 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            cors_origin: default_cors_origin(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            url: default_storage_url(),
            redis_prefix: default_redis_prefix(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Values supplied on the command line or through the environment.
///
/// Each `Some` wins over whatever the config file says.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub cors_origin: Option<String>,
    pub storage_url: Option<String>,
    pub api_url: Option<String>,
}
