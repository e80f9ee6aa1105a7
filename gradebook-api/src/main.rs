//! gradebook-api - Personal grade tracker service
//!
//! Loads the curriculum and grade store from the data folder and serves
//! the compiled view, grade updates and CSV export over HTTP.

use anyhow::{Context, Result};
use clap::Parser;
use gradebook_api::{build_router, AppState};
use gradebook_common::config::{load_toml_config, CliOverrides, Settings};
use gradebook_common::Gradebook;
use std::path::PathBuf;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for gradebook-api
#[derive(Parser, Debug)]
#[command(name = "gradebook-api")]
#[command(about = "Personal academic grade tracker")]
#[command(version)]
struct Args {
    /// Folder holding disciplinas.json and notas.json
    /// (falls back to GRADEBOOK_DATA_FOLDER, then the config file)
    #[arg(short, long)]
    data_folder: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "GRADEBOOK_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(short, long, env = "GRADEBOOK_BIND")]
    bind: Option<String>,

    /// TOML config file (default: <config dir>/gradebook/config.toml)
    #[arg(short, long, env = "GRADEBOOK_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = load_toml_config(args.config.as_deref())
        .context("Failed to load configuration")?;
    let config_found = toml_config.is_some();
    let settings = Settings::resolve(
        &CliOverrides {
            data_folder: args.data_folder,
            port: args.port,
            bind_address: args.bind,
        },
        &toml_config.unwrap_or_default(),
    );

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "gradebook_api={level},gradebook_common={level},tower_http={level}",
                level = settings.log_level
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting gradebook-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    if !config_found {
        warn!("No config file found, using defaults");
    }
    info!("Data folder: {}", settings.data_folder.display());
    info!("Curriculum: {}", settings.curriculum_path.display());
    info!("Grade store: {}", settings.grades_path.display());
    if !settings.curriculum_path.exists() {
        warn!("Curriculum file not found, the course list will be empty");
    }

    let gradebook = Gradebook::from_paths(&settings.curriculum_path, &settings.grades_path);
    let app = build_router(AppState::new(gradebook));

    let addr = format!("{}:{}", settings.bind_address, settings.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("gradebook-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
