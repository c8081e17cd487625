//! # Featured Products
//!
//! Cache-aside access to the featured subset of the catalog.
//!
//! The cache holds one JSON snapshot of every product with
//! `is_featured = true` under [`FEATURED_PRODUCTS_KEY`]. Reads go to the
//! cache first and populate it on a miss. Toggling a product recomputes the
//! whole subset from the store and overwrites the snapshot before returning.
//!
//! The store write and the cache overwrite are not atomic: a failure in
//! between leaves the snapshot stale until the next refresh. Concurrent
//! refreshes race and the last write wins.

use crate::cache::SharedSnapshotCache;
use crate::error::{PersistenceError, Result};
use crate::repository::SharedProductRepository;
use catalog_domain::{Product, ProductId};

/// Cache key of the featured-products snapshot
pub const FEATURED_PRODUCTS_KEY: &str = "featured_products";

/// `entity_type` of the `NotFound` raised when nothing is featured
pub const FEATURED_PRODUCTS_ENTITY: &str = "FeaturedProducts";

/// Mediates featured-set reads and writes between the store and the cache
#[derive(Clone)]
pub struct FeaturedProducts {
    repo: SharedProductRepository,
    cache: SharedSnapshotCache,
}

impl FeaturedProducts {
    pub fn new(repo: SharedProductRepository, cache: SharedSnapshotCache) -> Self {
        Self { repo, cache }
    }

    /// Featured products, served from the snapshot when present.
    ///
    /// On a miss the store is queried once. An empty featured set on a miss
    /// is `NotFound` and is not cached; an empty snapshot on a hit is a valid
    /// empty result.
    ///
    /// # Errors
    ///
    /// `NotFound` as above; cache, store and serialization failures are
    /// returned as-is.
    pub async fn read(&self) -> Result<Vec<Product>> {
        if let Some(snapshot) = self.cache.get(FEATURED_PRODUCTS_KEY).await? {
            tracing::debug!(key = FEATURED_PRODUCTS_KEY, "Featured products cache hit");
            return Ok(serde_json::from_str(&snapshot)?);
        }

        tracing::debug!(
            key = FEATURED_PRODUCTS_KEY,
            "Featured products cache miss, querying store"
        );
        let featured = self.repo.find_featured().await?;

        if featured.is_empty() {
            return Err(PersistenceError::NotFound {
                entity_type: FEATURED_PRODUCTS_ENTITY.to_string(),
                key: FEATURED_PRODUCTS_KEY.to_string(),
            });
        }

        let snapshot = serde_json::to_string(&featured)?;
        self.cache.set(FEATURED_PRODUCTS_KEY, &snapshot).await?;

        Ok(featured)
    }

    /// Flip the featured flag of a product and refresh the snapshot.
    ///
    /// A failed refresh is logged and does not fail the toggle.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id (no cache write happens), or the store
    /// failure that prevented the update.
    pub async fn toggle(&self, id: ProductId) -> Result<Product> {
        let Some(mut product) = self.repo.find_by_id(id).await? else {
            return Err(PersistenceError::product_not_found(id));
        };

        product.toggle_featured();
        self.repo.update(&product).await?;

        tracing::info!(
            product_id = %id,
            is_featured = product.is_featured,
            "Featured status toggled"
        );

        if let Err(e) = self.refresh().await {
            tracing::warn!(product_id = %id, error = %e, "Failed to refresh featured products cache");
        }

        Ok(product)
    }

    /// Recompute the featured subset from the store and overwrite the snapshot.
    ///
    /// An empty subset is written as `[]`. Returns the number of products written.
    ///
    /// # Errors
    ///
    /// Store, serialization or cache failures.
    pub async fn refresh(&self) -> Result<usize> {
        let featured = self.repo.find_featured().await?;
        let snapshot = serde_json::to_string(&featured)?;
        self.cache.set(FEATURED_PRODUCTS_KEY, &snapshot).await?;

        tracing::debug!(count = featured.len(), "Featured products snapshot refreshed");
        Ok(featured.len())
    }
}
