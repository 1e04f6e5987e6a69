//! Configuration: TOML file, defaults, and CLI/environment overrides.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{ClientConfig, Config, ConfigOverrides, ServerConfig, StorageConfig};
