//! # Repository Traits
//!
//! Abstract catalog store interface.
//! Implementations can be swapped for different backends (ScyllaDB, in-memory, etc.)

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use catalog_domain::{Product, ProductId, ProductSummary};

// =============================================================================
// PRODUCT REPOSITORY
// =============================================================================

/// Repository for Product entity operations.
///
/// Every method returns detached copies; nothing handed out is live-bound
/// to the store.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Get every product in the catalog
    async fn find_all(&self) -> Result<Vec<Product>>;

    /// Get products whose category matches exactly
    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>>;

    /// Get products with `is_featured = true`
    async fn find_featured(&self) -> Result<Vec<Product>>;

    /// Get product by ID
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>>;

    /// Create a new product
    async fn insert(&self, product: &Product) -> Result<()>;

    /// Persist every field of an existing product.
    ///
    /// Returns `NotFound` when the row no longer exists; nothing is written.
    async fn update(&self, product: &Product) -> Result<()>;

    /// Delete product, returning the removed record if it existed
    async fn delete_by_id(&self, id: ProductId) -> Result<Option<Product>>;

    /// Up to `size` products chosen uniformly at random, projected
    async fn sample(&self, size: usize) -> Result<Vec<ProductSummary>>;
}

/// Shared repository handle
pub type SharedProductRepository = Arc<dyn ProductRepository>;
