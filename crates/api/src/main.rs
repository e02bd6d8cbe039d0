use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plantdx_api::config::{LogFormat, ServerConfig, StoreBackend};
use plantdx_api::router::build_app_router;
use plantdx_api::state::AppState;
use plantdx_db::repositories::{DiseaseStore, InMemoryDiseaseRepo, MongoDiseaseRepo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid server configuration")?;

    // --- Tracing ---
    let json_logs = config.log_format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plantdx_api=debug,plantdx_db=debug,tower_http=debug".into()),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!(
        host = %config.host,
        port = config.port,
        confidence_policy = %config.confidence_policy,
        "Loaded server configuration",
    );

    // --- Store ---
    let store = open_store(&config).await?;

    // --- Router ---
    let addr = SocketAddr::new(
        config.host.parse().context("Invalid HOST address")?,
        config.port,
    );
    let app = build_app_router(AppState::new(store, config));

    // --- Start server ---
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Open the configured store. A MongoDB store must answer a ping before the
/// server starts listening.
async fn open_store(config: &ServerConfig) -> anyhow::Result<Arc<dyn DiseaseStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; records are lost on restart");
            Ok(Arc::new(InMemoryDiseaseRepo::new()))
        }
        StoreBackend::Mongo => {
            let settings = config
                .database
                .connection_settings()
                .context("Invalid database configuration")?;

            let db = plantdx_db::connect(&settings)
                .await
                .context("Failed to create MongoDB client")?;
            plantdx_db::health_check(&db)
                .await
                .context("MongoDB ping failed")?;
            tracing::info!(
                database = %config.database.name,
                collection = %config.database.collection,
                "Connected to MongoDB",
            );

            Ok(Arc::new(MongoDiseaseRepo::new(&db, &config.database.collection)))
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
