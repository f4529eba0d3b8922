//! demo-mc - AI Music Composer service
//!
//! Serves the composer page and session API on port 5761. Audio is
//! rendered by an external text-to-music backend reached over HTTP; the
//! client for it is built once at startup and shared by all sessions.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use demo_common::config::load_module_config;
use demo_common::logging::init_tracing;
use demo_common::shutdown::shutdown_signal;
use demo_mc::composer::Composer;
use demo_mc::config::{CliOverrides, Settings, TomlConfig, MODULE_NAME};
use demo_mc::generator::HttpAudioGenerator;
use demo_mc::persistence::WavPersistence;
use demo_mc::{build_router, AppState};

/// Command-line arguments for demo-mc
#[derive(Parser, Debug)]
#[command(name = "demo-mc")]
#[command(about = "AI music composer web service")]
#[command(version)]
struct Args {
    /// Config file (default: <config dir>/demo/demo-mc.toml)
    #[arg(short, long, env = "DEMO_MC_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "DEMO_MC_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "DEMO_MC_PORT")]
    port: Option<u16>,

    /// Directory for generated WAV files
    #[arg(short, long, env = "DEMO_MC_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Base URL of the text-to-music backend
    #[arg(long, env = "DEMO_MC_GENERATOR_URL")]
    generator_url: Option<String>,

    /// Generation request timeout in seconds
    #[arg(long, env = "DEMO_MC_GENERATOR_TIMEOUT")]
    generator_timeout: Option<u64>,

    /// Seconds without requests before a session is dropped
    #[arg(long, env = "DEMO_MC_SESSION_IDLE_TIMEOUT")]
    session_idle_timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let loaded = load_module_config::<TomlConfig>(MODULE_NAME, args.config.as_deref())
        .context("Failed to load configuration")?;

    init_tracing(&loaded.config.logging).context("Failed to initialize logging")?;

    info!(
        "Starting AI Music Composer (demo-mc) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &loaded.source {
        Some(path) => info!("Config file: {}", path.display()),
        None => warn!("No config file found, using defaults"),
    }

    let settings = Settings::resolve(
        CliOverrides {
            host: args.host,
            port: args.port,
            output_dir: args.output_dir,
            generator_url: args.generator_url,
            generator_timeout_secs: args.generator_timeout,
            session_idle_timeout_secs: args.session_idle_timeout,
        },
        &loaded.config,
    );

    let generator = HttpAudioGenerator::new(&settings.generator_url, settings.generator_timeout)
        .context("Failed to build audio model client")?;
    info!(
        "Audio model: {} (timeout {}s)",
        generator.base_url(),
        settings.generator_timeout.as_secs()
    );
    info!("Output directory: {}", settings.output_dir.display());

    let composer = Composer::new(
        Arc::new(generator),
        WavPersistence::new(&settings.output_dir),
    );
    let state = AppState::new(composer, settings.history_limit);
    state.sessions.spawn_sweeper(
        settings.session_idle_timeout,
        settings.session_sweep_interval(),
    );
    info!(
        "Session idle timeout: {}s",
        settings.session_idle_timeout.as_secs()
    );

    let app = build_router(state);

    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;
    info!("demo-mc listening on http://{}", address);
    info!("Health check: http://{}/health", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}
