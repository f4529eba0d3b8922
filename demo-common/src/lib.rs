//! # Demo Common Library
//!
//! Shared code for the demo services:
//! - Error type shared by all crates
//! - TOML bootstrap configuration and setting resolution
//! - Logging initialization
//! - Graceful shutdown signal

pub mod config;
pub mod error;
pub mod logging;
pub mod shutdown;

pub use error::{Error, Result};
