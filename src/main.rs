//! Catalog Server - A product catalog REST service
//!
//! Provides CRUD over a relational product table with a TTL snapshot cache
//! for the listing and lifecycle management for uploaded image files.

mod api;
mod cache;
mod catalog;
mod config;
mod error;
mod images;
mod models;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use catalog::CatalogService;
use config::Config;
use images::ImageStore;
use store::SqliteProductStore;

/// Main entry point for the catalog server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from `.env` / environment variables
/// 3. Connect to the product store and bootstrap the schema
/// 4. Prepare the shared image directory
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Catalog Server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, database_url={}, image_dir={}, cache_ttl={}s",
        config.server_port,
        config.database_url,
        config.image_dir.display(),
        config.cache_ttl
    );

    // Connect to the store and bootstrap the products table
    let store = SqliteProductStore::connect(&config.database_url).await?;
    info!("Product store initialized");

    // Prepare the shared image directory
    let images = ImageStore::new(&config.image_dir);
    images.ensure_dir().await?;

    // Create application state with the catalog service
    let catalog = CatalogService::new(
        Arc::new(store),
        images,
        Duration::from_secs(config.cache_ttl),
    );
    let state = AppState::new(catalog);

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
