//! Configuration loading.

pub mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, default_config_path};
pub use types::{CoercionConfig, ConfigFile, LoggingConfig, ResolvedConfig};
