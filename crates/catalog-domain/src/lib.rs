//! # Product Catalog - Domain Model
//!
//! Core entities and value objects for the product catalog. These types
//! are the single source of truth across all layers: persistence, cache
//! snapshots and the HTTP API.
//!
//! The JSON shape (`_id`, `isFeatured`, `createdAt`, ...) is the wire
//! format served to storefront clients and the format of the cached
//! featured-products snapshot.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Store-assigned product identifier
pub type ProductId = Uuid;

/// Number of products returned by the recommendation sampler
pub const RECOMMENDATION_SAMPLE_SIZE: usize = 3;

/// Folder on the image host that product images are uploaded into
pub const PRODUCT_IMAGE_FOLDER: &str = "products";

// =============================================================================
// ENTITY TYPES
// =============================================================================

/// Product entity - one record of the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,

    /// Hosted image URL; `None` or empty means the product has no image
    #[serde(default)]
    pub image: Option<String>,
    pub category: String,

    #[serde(default)]
    pub is_featured: bool,

    // Metadata
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a new, not yet persisted product from creation input.
    ///
    /// `image_url` is the durable URL returned by the image host, if any.
    #[must_use]
    pub fn new(input: NewProduct, image_url: Option<String>) -> Self {
        let now = timestamp_now();
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            price: input.price,
            image: image_url.filter(|url| !url.is_empty()),
            category: input.category,
            is_featured: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether an externally hosted image is attached
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.image.as_deref().is_some_and(|url| !url.is_empty())
    }

    /// Flip the featured flag. This is the only featured-status transition.
    pub fn toggle_featured(&mut self) {
        self.is_featured = !self.is_featured;
        self.updated_at = timestamp_now();
    }

    /// Recommendation projection of this product
    #[must_use]
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            price: self.price,
        }
    }
}

/// Product creation input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,

    /// Image payload to upload (data URI or remote URL)
    #[serde(default)]
    pub image: Option<String>,
    pub category: String,
}

impl NewProduct {
    /// Check invariants that the store relies on.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPrice`] for negative or non-finite prices.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::InvalidPrice(self.price));
        }
        Ok(())
    }

    /// Image payload, ignoring empty strings
    #[must_use]
    pub fn image_data(&self) -> Option<&str> {
        self.image.as_deref().filter(|data| !data.is_empty())
    }
}

/// Projection returned by the recommendation sampler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    pub price: f64,
}

/// Current time truncated to the millisecond precision the store keeps
#[must_use]
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

// =============================================================================
// ERRORS
// =============================================================================

/// Domain-level errors
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Invalid price: {0}")]
    InvalidPrice(f64),
}
