//! # Request Bodies
//!
//! Input definitions for catalog mutations.

use serde::Deserialize;

use catalog_domain::NewProduct;

// =============================================================================
// PRODUCT INPUTS
// =============================================================================

/// Body of `POST /api/products`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    /// Data URI or remote URL handed to the image host
    #[serde(default)]
    pub image: Option<String>,
    pub category: String,
}

impl From<CreateProductInput> for NewProduct {
    fn from(input: CreateProductInput) -> Self {
        Self {
            name: input.name.trim().to_string(),
            description: input.description,
            price: input.price,
            image: input.image,
            category: input.category.trim().to_string(),
        }
    }
}
