//! # Product Catalog API Server
//!
//! Binary entry point for the catalog HTTP service.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_api::{ApiContext, Config, build_router};
use catalog_persistence::{
    CacheClient, CloudinaryConfig, CloudinaryImageHost, DisabledImageHost, ScyllaClient,
    ScyllaProductRepository, SharedImageHost,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!(
        version = catalog_api::VERSION,
        "Starting Product Catalog API"
    );

    // Initialize ScyllaDB client
    tracing::info!(
        hosts = ?config.scylla.hosts,
        keyspace = %config.scylla.keyspace,
        "Connecting to ScyllaDB"
    );

    let scylla = Arc::new(ScyllaClient::new(config.scylla.clone().into()).await?);
    tracing::info!("ScyllaDB connected");

    // Initialize Redis cache
    tracing::info!(url = %config.redis.url, "Connecting to Redis");

    let cache = CacheClient::new(config.redis.clone().into()).await?;
    cache.ping().await?;
    tracing::info!("Redis connected");

    // Image host
    let images = image_host(config.cloudinary.clone().into());

    // Build API context
    let api_ctx = ApiContext::new(
        Arc::new(ScyllaProductRepository::new(scylla)),
        Arc::new(cache),
        images,
    );

    // Build router
    let app = build_router(api_ctx, &config.cors_origins);

    // Start server
    let addr = config.server_addr;
    tracing::info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Catalog API available at http://{}/api/products", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Cloudinary when fully configured, otherwise a host that refuses uploads
fn image_host(config: CloudinaryConfig) -> SharedImageHost {
    if config.is_complete() {
        tracing::info!(cloud_name = %config.cloud_name, "Using Cloudinary image host");
        Arc::new(CloudinaryImageHost::new(config))
    } else {
        tracing::warn!("Cloudinary credentials incomplete, products with images will be rejected");
        Arc::new(DisabledImageHost)
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
