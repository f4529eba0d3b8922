//! Configuration for demo-mc
//!
//! TOML bootstrap file `demo-mc.toml`, same lookup and priority rules as
//! the other demo services: command line > file > compiled default.

use demo_common::config::{resolve_setting, LoggingConfig};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Module name, also the config file stem
pub const MODULE_NAME: &str = "demo-mc";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5761;
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";
pub const DEFAULT_GENERATOR_URL: &str = "http://127.0.0.1:8765";
/// Generation of a 30 s clip on CPU can take minutes
pub const DEFAULT_GENERATOR_TIMEOUT_SECS: u64 = 300;
/// Tracks shown in the history sidebar
pub const DEFAULT_HISTORY_LIMIT: usize = 5;
/// Sessions unused for this long are dropped
pub const DEFAULT_SESSION_IDLE_TIMEOUT_SECS: u64 = 3600;
/// Upper bound on the time between idle-session sweeps
const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Contents of `demo-mc.toml`; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Where generated WAV files are written
    pub output_dir: Option<PathBuf>,
    /// Base URL of the text-to-music inference backend
    pub generator_url: Option<String>,
    pub generator_timeout_secs: Option<u64>,
    pub history_limit: Option<usize>,
    pub session_idle_timeout_secs: Option<u64>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub output_dir: Option<PathBuf>,
    pub generator_url: Option<String>,
    pub generator_timeout_secs: Option<u64>,
    pub session_idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub output_dir: PathBuf,
    pub generator_url: String,
    pub generator_timeout: Duration,
    pub history_limit: usize,
    pub session_idle_timeout: Duration,
}

impl Settings {
    pub fn resolve(cli: CliOverrides, toml: &TomlConfig) -> Self {
        let timeout_secs = resolve_setting(
            "generator_timeout_secs",
            cli.generator_timeout_secs,
            toml.generator_timeout_secs,
            DEFAULT_GENERATOR_TIMEOUT_SECS,
        );

        let idle_secs = resolve_setting(
            "session_idle_timeout_secs",
            cli.session_idle_timeout_secs,
            toml.session_idle_timeout_secs,
            DEFAULT_SESSION_IDLE_TIMEOUT_SECS,
        );

        Self {
            host: resolve_setting("host", cli.host, toml.host.clone(), DEFAULT_HOST.to_string()),
            port: resolve_setting("port", cli.port, toml.port, DEFAULT_PORT),
            output_dir: resolve_setting(
                "output_dir",
                cli.output_dir,
                toml.output_dir.clone(),
                PathBuf::from(DEFAULT_OUTPUT_DIR),
            ),
            generator_url: resolve_setting(
                "generator_url",
                cli.generator_url,
                toml.generator_url.clone(),
                DEFAULT_GENERATOR_URL.to_string(),
            ),
            generator_timeout: Duration::from_secs(timeout_secs),
            history_limit: resolve_setting(
                "history_limit",
                None,
                toml.history_limit,
                DEFAULT_HISTORY_LIMIT,
            ),
            session_idle_timeout: Duration::from_secs(idle_secs),
        }
    }

    /// How often to look for idle sessions
    pub fn session_sweep_interval(&self) -> Duration {
        self.session_idle_timeout
            .min(MAX_SWEEP_INTERVAL)
            .max(Duration::from_secs(1))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(CliOverrides::default(), &TomlConfig::default());
        assert_eq!(settings.bind_address(), "127.0.0.1:5761");
        assert_eq!(settings.output_dir, PathBuf::from("outputs"));
        assert_eq!(settings.generator_timeout, Duration::from_secs(300));
        assert_eq!(settings.history_limit, 5);
        assert_eq!(settings.session_idle_timeout, Duration::from_secs(3600));
        assert_eq!(settings.session_sweep_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_session_idle_timeout_layers() {
        let toml: TomlConfig = toml::from_str("session_idle_timeout_secs = 20").unwrap();
        let settings = Settings::resolve(CliOverrides::default(), &toml);
        assert_eq!(settings.session_idle_timeout, Duration::from_secs(20));
        assert_eq!(settings.session_sweep_interval(), Duration::from_secs(20));

        let cli = CliOverrides {
            session_idle_timeout_secs: Some(0),
            ..Default::default()
        };
        let settings = Settings::resolve(cli, &toml);
        assert_eq!(settings.session_idle_timeout, Duration::ZERO);
        assert_eq!(settings.session_sweep_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_toml_and_cli_layers() {
        let toml: TomlConfig = toml::from_str(
            r#"
output_dir = "/var/lib/demo/tracks"
generator_url = "http://gpu-box:8765"
history_limit = 8

[logging]
level = "debug"
"#,
        )
        .unwrap();
        let cli = CliOverrides {
            generator_url: Some("http://localhost:9000".to_string()),
            ..Default::default()
        };

        let settings = Settings::resolve(cli, &toml);
        assert_eq!(settings.output_dir, PathBuf::from("/var/lib/demo/tracks"));
        assert_eq!(settings.generator_url, "http://localhost:9000");
        assert_eq!(settings.history_limit, 8);
        assert_eq!(toml.logging.level, "debug");
    }
}
