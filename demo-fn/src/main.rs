//! demo-fn - Fake News Detector service
//!
//! Loads the exported TF-IDF vectorizer and linear classifier once at
//! startup and serves a single-form web UI plus a JSON API on port 5760.
//! If the artifacts cannot be loaded the service still starts; classify
//! requests then fail with 503 until it is restarted with valid artifacts.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};

use demo_common::config::load_module_config;
use demo_common::logging::init_tracing;
use demo_common::shutdown::shutdown_signal;
use demo_fn::classifier::NewsClassifier;
use demo_fn::config::{CliOverrides, Settings, TomlConfig, MODULE_NAME};
use demo_fn::{build_router, AppState};

/// Command-line arguments for demo-fn
#[derive(Parser, Debug)]
#[command(name = "demo-fn")]
#[command(about = "Fake news detector web service")]
#[command(version)]
struct Args {
    /// Config file (default: <config dir>/demo/demo-fn.toml)
    #[arg(short, long, env = "DEMO_FN_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "DEMO_FN_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "DEMO_FN_PORT")]
    port: Option<u16>,

    /// Exported vectorizer artifact (JSON)
    #[arg(long, env = "DEMO_FN_VECTORIZER")]
    vectorizer: Option<PathBuf>,

    /// Exported classifier artifact (JSON)
    #[arg(long, env = "DEMO_FN_MODEL")]
    model: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let loaded = load_module_config::<TomlConfig>(MODULE_NAME, args.config.as_deref())
        .context("Failed to load configuration")?;

    init_tracing(&loaded.config.logging).context("Failed to initialize logging")?;

    info!(
        "Starting Fake News Detector (demo-fn) v{} [{}] built {} ({})",
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
            vectorizer_path: args.vectorizer,
            model_path: args.model,
        },
        &loaded.config,
    );

    info!("Vectorizer: {}", settings.vectorizer_path.display());
    info!("Classifier: {}", settings.model_path.display());

    let state = match NewsClassifier::load(&settings.vectorizer_path, &settings.model_path) {
        Ok(classifier) => {
            info!("✓ Model loaded ({} features)", classifier.n_features());
            AppState::new(classifier)
        }
        Err(e) => {
            error!("Failed to load model artifacts: {}", e);
            warn!("Classification disabled until restart with valid artifacts");
            AppState::without_model(&e)
        }
    };

    let app = build_router(state);

    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;
    info!("demo-fn listening on http://{}", address);
    info!("Health check: http://{}/health", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}
