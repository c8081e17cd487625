//! # Media Module
//!
//! Third-party image host holding product pictures.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use catalog_domain::PRODUCT_IMAGE_FOLDER;

#[cfg(feature = "cloudinary")]
pub mod cloudinary;
pub mod disabled;
pub mod memory;

#[cfg(feature = "cloudinary")]
pub use cloudinary::{CloudinaryConfig, CloudinaryImageHost};
pub use disabled::DisabledImageHost;
pub use memory::InMemoryImageHost;

/// Remote image storage
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload `data` (data URI or remote URL) into `folder`, returning its durable URL
    async fn upload(&self, data: &str, folder: &str) -> Result<String>;

    /// Delete the image stored under `public_id`
    async fn destroy(&self, public_id: &str) -> Result<()>;
}

/// Shared image host handle
pub type SharedImageHost = Arc<dyn ImageHost>;

/// Public id of a product image from its hosted URL.
///
/// `https://res.cloudinary.com/x/image/upload/v1/products/abc123.jpg` maps to
/// `products/abc123`.
#[must_use]
pub fn product_image_public_id(url: &str) -> Option<String> {
    let file_name = url.rsplit('/').next()?;
    let stem = file_name.split('.').next()?;
    if stem.is_empty() {
        return None;
    }
    Some(format!("{PRODUCT_IMAGE_FOLDER}/{stem}"))
}
