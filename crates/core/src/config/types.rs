use std::path::PathBuf;

use serde::Deserialize;

use crate::coerce::CoercionMode;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    #[serde(default)]
    pub coercion: CoercionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct CoercionConfig {
    /// `lenient` substitutes sentinels for bad input, `strict` rejects it.
    #[serde(default)]
    pub mode: CoercionMode,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    /// Config file the values came from; `None` when built-in defaults apply.
    pub source: Option<PathBuf>,
    pub coercion: CoercionConfig,
    pub logging: LoggingConfig,
}
