//! Unit tests for configuration loading and graceful degradation
//!
//! Covers:
//! - Missing TOML files fall back to defaults
//! - Explicit config paths must exist and parse
//! - Default config locations under the platform config directory
//!
//! Tests that change XDG_CONFIG_HOME are marked #[serial] so they do not
//! race each other.

use demo_common::config::{load_module_config, load_toml_config, LoggingConfig};
use demo_common::Error;
use serde::Deserialize;
use serial_test::serial;
use std::path::PathBuf;
use tempfile::TempDir;

#[derive(Debug, Default, Deserialize, PartialEq)]
struct TestConfig {
    port: Option<u16>,
    #[serde(default)]
    logging: LoggingConfig,
}

#[test]
fn test_logging_config_defaults() {
    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "info");
    assert!(logging.file.is_none());
}

#[test]
fn test_load_toml_config_parses_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("demo-test.toml");
    std::fs::write(
        &path,
        r#"
port = 6000

[logging]
level = "debug"
file = "/tmp/demo.log"
"#,
    )
    .unwrap();

    let config: TestConfig = load_toml_config(&path).unwrap();
    assert_eq!(config.port, Some(6000));
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.file, Some(PathBuf::from("/tmp/demo.log")));
}

#[test]
fn test_partial_logging_section_uses_default_level() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("demo-test.toml");
    std::fs::write(&path, "[logging]\nfile = \"out.log\"\n").unwrap();

    let config: TestConfig = load_toml_config(&path).unwrap();
    assert_eq!(config.port, None);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_invalid_toml_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "port = \"not a number").unwrap();

    let result: Result<TestConfig, Error> = load_toml_config(&path);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_explicit_missing_file_is_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let result = load_module_config::<TestConfig>("demo-test", Some(&missing));
    match result {
        Err(Error::Config(msg)) => assert!(msg.contains("not found")),
        other => panic!("Expected config error, got {:?}", other.map(|c| c.config)),
    }
}

#[test]
fn test_explicit_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "port = 7001\n").unwrap();

    let loaded = load_module_config::<TestConfig>("demo-test", Some(&path)).unwrap();
    assert_eq!(loaded.config.port, Some(7001));
    assert_eq!(loaded.source, Some(path));
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_missing_config_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", dir.path());

    let loaded = load_module_config::<TestConfig>("demo-unconfigured-module", None).unwrap();
    assert_eq!(loaded.config, TestConfig::default());
    assert!(loaded.source.is_none());

    std::env::remove_var("XDG_CONFIG_HOME");
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_config_found_in_user_config_dir() {
    let dir = TempDir::new().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", dir.path());

    let module_dir = dir.path().join("demo");
    std::fs::create_dir_all(&module_dir).unwrap();
    let path = module_dir.join("demo-located.toml");
    std::fs::write(&path, "port = 5999\n").unwrap();

    let loaded = load_module_config::<TestConfig>("demo-located", None).unwrap();
    assert_eq!(loaded.config.port, Some(5999));
    assert_eq!(loaded.source, Some(path));

    std::env::remove_var("XDG_CONFIG_HOME");
}
