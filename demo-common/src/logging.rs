//! Tracing subscriber initialization shared by the service binaries

use crate::config::LoggingConfig;
use crate::{Error, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Build the env filter: `RUST_LOG` wins, otherwise the configured level
pub fn env_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", logging.level)))
}

/// Install the global tracing subscriber
///
/// Logs go to stderr unless `logging.file` is set, in which case they are
/// appended to that file without ANSI colors.
pub fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = env_filter(logging);

    match &logging.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e))),
    }
}
