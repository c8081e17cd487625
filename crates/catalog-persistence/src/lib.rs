//! # Catalog Persistence Library
//!
//! Persistence layer for the product catalog service.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Application Layer                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    FeaturedProducts                          │
//! │      (cache-aside read, write-through refresh on toggle)     │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                   │
//!                    ▼                   ▼
//! ┌─────────────────────────┐   ┌──────────────────────────────┐
//! │     SnapshotCache       │   │     ProductRepository        │
//! │  (Redis, one JSON key)  │   │   (ScyllaDB, source of truth)│
//! └─────────────────────────┘   └──────────────────────────────┘
//! ```
//!
//! Product images live on a third-party [`media::ImageHost`].
//!
//! ## Features
//!
//! - `scylla`: Enable ScyllaDB backend (default)
//! - `redis`: Enable Redis cache layer (default)
//! - `cloudinary`: Enable the Cloudinary image host (default)
//!
//! In-memory implementations of every trait are always available.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use catalog_persistence::{
//!     CacheClient, CacheConfig, FeaturedProducts, ScyllaClient, ScyllaConfig,
//!     ScyllaProductRepository,
//! };
//!
//! let scylla = Arc::new(ScyllaClient::new(ScyllaConfig::default()).await?);
//! let cache = CacheClient::new(CacheConfig::default()).await?;
//!
//! let featured = FeaturedProducts::new(
//!     Arc::new(ScyllaProductRepository::new(scylla)),
//!     Arc::new(cache),
//! );
//!
//! let products = featured.read().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod error;
pub mod featured;
pub mod media;
pub mod repository;

// Re-export commonly used types
pub use cache::{InMemorySnapshotCache, SharedSnapshotCache, SnapshotCache};
#[cfg(feature = "redis")]
pub use cache::{CacheClient, CacheConfig};
pub use error::{PersistenceError, Result};
pub use featured::{FEATURED_PRODUCTS_ENTITY, FEATURED_PRODUCTS_KEY, FeaturedProducts};
#[cfg(feature = "cloudinary")]
pub use media::{CloudinaryConfig, CloudinaryImageHost};
pub use media::{
    DisabledImageHost, ImageHost, InMemoryImageHost, SharedImageHost, product_image_public_id,
};
pub use repository::{InMemoryProductRepository, ProductRepository, SharedProductRepository};
#[cfg(feature = "scylla")]
pub use repository::{ScyllaClient, ScyllaConfig, ScyllaProductRepository};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
