// ABOUTME: Entry point for the namerecords binary.
// ABOUTME: Loads configuration, initializes tracing, opens the database, and serves the API until shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use namerecords_server::{AppState, ServiceConfig, create_router};
use namerecords_store::NameRecordStore;
use tokio::net::TcpListener;
use tokio::signal;

/// Bearer-token protected CRUD service for name records.
#[derive(Debug, Parser)]
#[command(name = "namerecords", version, about)]
struct Cli {
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Database connection string (overrides the environment-selected URL)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // The log filter depends on the environment, so config warnings go
    // through a temporary subscriber until the real one is installed.
    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .finish();
    let mut config = tracing::subscriber::with_default(bootstrap, ServiceConfig::from_env);
    if let Some(port) = cli.port {
        config.port = port;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.environment.default_log_filter().into()),
        )
        .init();

    let database_url = cli
        .database_url
        .unwrap_or_else(|| config.active_database_url().to_string());
    let store = NameRecordStore::open(&database_url)?;
    tracing::info!(
        environment = %config.environment,
        database = %database_url,
        "namerecords starting up"
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(AppState::new(store, config));
    let app = create_router(Arc::clone(&state));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("server listening at http://localhost:{}", addr.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    drop(state);
    tracing::info!("namerecords shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
