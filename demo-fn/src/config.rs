//! Configuration for demo-fn
//!
//! TOML bootstrap file `demo-fn.toml` (see `demo_common::config` for where
//! it is looked up). Command-line arguments override file values, which
//! override the compiled defaults below.

use demo_common::config::{resolve_setting, LoggingConfig};
use serde::Deserialize;
use std::path::PathBuf;

/// Module name, also the config file stem
pub const MODULE_NAME: &str = "demo-fn";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5760;
pub const DEFAULT_VECTORIZER_PATH: &str = "vectorizer.json";
pub const DEFAULT_MODEL_PATH: &str = "model.json";

/// Contents of `demo-fn.toml`; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Exported TF-IDF vectorizer artifact
    pub vectorizer_path: Option<PathBuf>,
    /// Exported linear classifier artifact
    pub model_path: Option<PathBuf>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values given on the command line (or via their env fallbacks)
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub vectorizer_path: Option<PathBuf>,
    pub model_path: Option<PathBuf>,
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub vectorizer_path: PathBuf,
    pub model_path: PathBuf,
}

impl Settings {
    pub fn resolve(cli: CliOverrides, toml: &TomlConfig) -> Self {
        Self {
            host: resolve_setting("host", cli.host, toml.host.clone(), DEFAULT_HOST.to_string()),
            port: resolve_setting("port", cli.port, toml.port, DEFAULT_PORT),
            vectorizer_path: resolve_setting(
                "vectorizer_path",
                cli.vectorizer_path,
                toml.vectorizer_path.clone(),
                PathBuf::from(DEFAULT_VECTORIZER_PATH),
            ),
            model_path: resolve_setting(
                "model_path",
                cli.model_path,
                toml.model_path.clone(),
                PathBuf::from(DEFAULT_MODEL_PATH),
            ),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
