//! Glossary web service - Main entry point
//!
//! Serves the bilingual glossary REST API backed by a SQLite database in
//! the resolved root folder.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use glossary_common::{config, db, SqliteTermStore};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glossary_web::api;

/// Command-line arguments for glossary-web
#[derive(Parser, Debug)]
#[command(name = "glossary-web")]
#[command(about = "Bilingual glossary web service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5730", env = "GLOSSARY_PORT")]
    port: u16,

    /// Root folder containing the glossary database
    #[arg(short, long, env = "GLOSSARY_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glossary_web=debug,glossary_common=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command-line arguments
    let args = Args::parse();

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref());
    info!("Starting glossary web service on port {}", args.port);
    info!("Root folder: {}", root_folder.display());

    // Open (or create) the database and build the store
    let pool = db::init_database(&config::db_path(&root_folder))
        .await
        .context("Failed to initialize database")?;
    let store = Arc::new(SqliteTermStore::new(pool));

    // Build the application router with the injected store
    let ctx = api::AppContext { store };
    let app = api::create_router(ctx);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

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
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
