//! # Product Catalog API
//!
//! HTTP API service for the product catalog.
//!
//! ## Features
//!
//! - **Catalog CRUD**: List, create and delete products
//! - **Featured Products**: Cache-aside reads with write-through refresh on toggle
//! - **Recommendations**: Random sample of the catalog
//! - **Image Hosting**: Product images uploaded to and removed from an external host
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Axum HTTP Server                         │
//! │                   (/api/products/*)                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                ApiContext / CatalogService                  │
//! │        (Repository, Featured Snapshot, Image Host)          │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                   │
//!                    ▼                   ▼
//! ┌─────────────────────────┐   ┌──────────────────────────────┐
//! │     Redis Cache         │   │        ScyllaDB              │
//! │  (Featured Snapshot)    │   │   (Source of Truth)          │
//! └─────────────────────────┘   └──────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod schema;
pub mod service;

use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use context::{ApiContext, ApiContextBuilder};
pub use error::{ApiError, ApiResult};
pub use service::CatalogService;

use handlers::{mutation, query};

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    "OK"
}

/// Routes mounted under `/api/products`
fn product_routes() -> Router<ApiContext> {
    Router::new()
        .route("/", get(query::list_products).post(mutation::create_product))
        .route("/featured", get(query::featured_products))
        .route("/recommendations", get(query::recommended_products))
        .route("/category/{category}", get(query::products_by_category))
        .route(
            "/{id}",
            delete(mutation::delete_product).patch(mutation::toggle_featured),
        )
}

/// CORS layer for the configured origins, `*` allowing any
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() || origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_origin(allow_origin)
        .allow_headers(Any)
}

/// Build the Axum router
pub fn build_router(ctx: ApiContext, cors_origins: &[String]) -> Router {
    Router::new()
        .nest("/api/products", product_routes())
        // Health check
        .route("/health", get(health_check))
        .route("/", get(|| async { "Product Catalog API" }))
        // State and middleware
        .with_state(ctx)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
