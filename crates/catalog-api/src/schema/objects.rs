//! # Response Bodies

use serde::Serialize;

use catalog_domain::Product;

/// `{"products": [...]}`
#[derive(Debug, Serialize)]
pub struct ProductList {
    pub products: Vec<Product>,
}

/// `{"product": {...}}`
#[derive(Debug, Serialize)]
pub struct ProductEnvelope {
    pub product: Product,
}

/// `{"message": "..."}`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
