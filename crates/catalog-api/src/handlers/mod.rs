//! # HTTP Handlers Module
//!
//! Read and write handlers for `/api/products`.

pub mod mutation;
pub mod query;

use uuid::Uuid;

use crate::error::ApiResult;

/// Parse a product id path segment
pub(crate) fn parse_product_id(raw: &str) -> ApiResult<Uuid> {
    Ok(Uuid::parse_str(raw)?)
}
