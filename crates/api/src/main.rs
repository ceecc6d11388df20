mod config;
mod error;
mod middleware;
mod routes;
mod state;

use std::sync::Arc;

use campaign_export_core::artifact::LocalArtifactStore;
use campaign_export_core::export::Exporter;
use campaign_export_core::sheet::ColumnSchema;
use campaign_export_core::store::PgDocumentStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience)
    let _ = dotenvy::dotenv();

    let config = config::AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    tracing::info!("Starting campaign export server");

    if config.uses_request_host() {
        tracing::warn!(
            "PUBLIC_BASE_URL is not set; download URLs will use the request Host header over http"
        );
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .connect(&config.database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {e}"))?;

    tracing::info!("Connected to PostgreSQL");

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {e}"))?;

    tracing::info!("Database migrations applied");

    // The registro layout is validated once here and shared by every request.
    let schema = ColumnSchema::registro()
        .map_err(|e| anyhow::anyhow!("Invalid registro column schema: {e}"))?;

    let artifacts = LocalArtifactStore::open(&config.export_dir)
        .await
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to open export directory {}: {e}",
                config.export_dir.display()
            )
        })?;

    tracing::info!(export_dir = %config.export_dir.display(), "Serving exports");

    let documents = Arc::new(PgDocumentStore::new(pool));
    let exporter = Exporter::new(documents.clone(), Arc::new(artifacts), Arc::new(schema));
    let state = state::AppState::new(config.clone(), documents, exporter);

    let app = routes::build_router(state)
        .layer(middleware::request_tracing::trace_layer())
        .layer(middleware::cors::cors_layer());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { tracing::info!("Received Ctrl+C, shutting down..."); }
        _ = terminate => { tracing::info!("Received SIGTERM, shutting down..."); }
    }
}
