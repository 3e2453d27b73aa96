//! booker-web - venue and artist booking site
//!
//! Settings resolve in order: command line, environment, config file,
//! compiled defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};
use booker_common::config::{CompiledDefaults, RootFolderInitializer, RootFolderResolver, TomlConfig};
use booker_common::db::init_database;
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booker_web::{build_router, AppConfig, AppState};

/// Command-line arguments for booker-web
#[derive(Parser, Debug)]
#[command(name = "booker-web")]
#[command(about = "Venue and artist booking site")]
#[command(version)]
struct Args {
    /// Folder holding booker.db
    #[arg(short, long, env = "BOOKER_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// Address to bind
    #[arg(short, long, env = "BOOKER_BIND")]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "BOOKER_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let (toml, toml_error) = match TomlConfig::load_platform() {
        Ok(toml) => (toml, None),
        Err(e) => (TomlConfig::default(), Some(e)),
    };
    let defaults = CompiledDefaults::for_current_platform();

    let log_level = toml.log_level.clone().unwrap_or(defaults.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("booker_web={log_level},booker_common={log_level},tower_http={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting booker-web v{}", env!("CARGO_PKG_VERSION"));
    if let Some(e) = toml_error {
        warn!("Ignoring config file, using defaults: {}", e);
    }

    let bind_addr = args
        .bind
        .or_else(|| toml.bind_addr.clone())
        .unwrap_or(defaults.bind_addr);
    let port = args.port.or(toml.port).unwrap_or(defaults.port);

    let root_folder = RootFolderResolver::new(args.root_folder, toml).resolve();
    let initializer = RootFolderInitializer::new(root_folder.clone());
    initializer
        .ensure_directory_exists()
        .context("Failed to create root folder")?;

    info!("Root folder: {}", root_folder.display());

    let database_path = initializer.database_path();
    info!("Database path: {}", database_path.display());

    let pool = init_database(&database_path)
        .await
        .context("Failed to open database")?;
    info!("Database ready");

    let config = AppConfig { bind_addr, port };
    let addr = config.listen_addr();
    let app = build_router(AppState::new(pool.clone(), config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("booker-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
