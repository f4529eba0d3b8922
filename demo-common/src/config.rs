//! Bootstrap configuration loading and setting resolution
//!
//! Each service reads an optional TOML file named after its module
//! (`demo-fn.toml`, `demo-mc.toml`). Every setting resolves in this order:
//! 1. Command-line argument or environment variable (handled by clap)
//! 2. TOML config file
//! 3. Compiled default
//!
//! A missing config file is not an error: the service starts with defaults.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

/// Directory name used under the platform config directory
pub const CONFIG_DIR_NAME: &str = "demo";

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// A parsed module config together with the file it came from
///
/// `source` is `None` when no config file was found and defaults are in use.
/// Tracing is not yet initialized while the config loads, so callers log
/// the source once the subscriber is up.
#[derive(Debug, Clone)]
pub struct LoadedConfig<T> {
    pub config: T,
    pub source: Option<PathBuf>,
}

/// Candidate config file locations for a module, highest priority first
///
/// - `<config_dir>/demo/<module>.toml` (e.g. `~/.config/demo/demo-fn.toml`)
/// - `/etc/demo/<module>.toml` (Linux only)
pub fn config_file_candidates(module_name: &str) -> Vec<PathBuf> {
    let file_name = format!("{}.toml", module_name);
    let mut candidates = Vec::new();

    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join(CONFIG_DIR_NAME).join(&file_name));
    }

    if cfg!(target_os = "linux") {
        candidates.push(PathBuf::from("/etc").join(CONFIG_DIR_NAME).join(&file_name));
    }

    candidates
}

/// First existing config file for a module, if any
pub fn find_config_file(module_name: &str) -> Option<PathBuf> {
    config_file_candidates(module_name)
        .into_iter()
        .find(|path| path.is_file())
}

/// Read and parse a TOML config file
pub fn load_toml_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read {}: {}", path.display(), e))
    })?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Load a module's config
///
/// An explicitly requested file must exist and parse. Without one, the
/// default locations are searched and a missing file falls back to
/// `T::default()`.
pub fn load_module_config<T>(module_name: &str, explicit: Option<&Path>) -> Result<LoadedConfig<T>>
where
    T: DeserializeOwned + Default,
{
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return Ok(LoadedConfig {
            config: load_toml_config(path)?,
            source: Some(path.to_path_buf()),
        });
    }

    match find_config_file(module_name) {
        Some(path) => Ok(LoadedConfig {
            config: load_toml_config(&path)?,
            source: Some(path),
        }),
        None => Ok(LoadedConfig {
            config: T::default(),
            source: None,
        }),
    }
}

/// Resolve one setting: command line first, then TOML, then the default
pub fn resolve_setting<T: Debug>(name: &str, cli: Option<T>, toml: Option<T>, default: T) -> T {
    if let Some(value) = cli {
        tracing::debug!(setting = name, value = ?value, "Setting from command line");
        return value;
    }
    if let Some(value) = toml {
        tracing::debug!(setting = name, value = ?value, "Setting from TOML config");
        return value;
    }
    tracing::debug!(setting = name, value = ?default, "Setting from compiled default");
    default
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_setting_priority() {
        assert_eq!(resolve_setting("port", Some(1), Some(2), 3), 1);
        assert_eq!(resolve_setting("port", None, Some(2), 3), 2);
        assert_eq!(resolve_setting("port", None::<u16>, None, 3), 3);
    }

    #[test]
    fn test_candidates_named_after_module() {
        let candidates = config_file_candidates("demo-fn");
        assert!(!candidates.is_empty());
        for path in candidates {
            assert!(path.ends_with("demo/demo-fn.toml"));
        }
    }
}
