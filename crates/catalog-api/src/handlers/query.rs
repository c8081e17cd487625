//! # Query Handlers
//!
//! Read operations for the catalog API.

use axum::Json;
use axum::extract::{Path, State};

use catalog_domain::{Product, ProductSummary};

use crate::context::ApiContext;
use crate::error::ApiResult;
use crate::schema::ProductList;

// =========================================================================
// PRODUCT QUERIES
// =========================================================================

/// `GET /api/products`
pub async fn list_products(State(ctx): State<ApiContext>) -> ApiResult<Json<ProductList>> {
    let products = ctx.catalog.list_all().await?;
    tracing::debug!(count = products.len(), "Listed products");
    Ok(Json(ProductList { products }))
}

/// `GET /api/products/featured`
///
/// Plain array of featured products, 404 when none are featured.
pub async fn featured_products(State(ctx): State<ApiContext>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(ctx.catalog.featured().await?))
}

/// `GET /api/products/recommendations`
pub async fn recommended_products(
    State(ctx): State<ApiContext>,
) -> ApiResult<Json<Vec<ProductSummary>>> {
    Ok(Json(ctx.catalog.recommended().await?))
}

/// `GET /api/products/category/{category}`
pub async fn products_by_category(
    State(ctx): State<ApiContext>,
    Path(category): Path<String>,
) -> ApiResult<Json<ProductList>> {
    tracing::debug!(category = %category, "Fetching products by category");
    let products = ctx.catalog.by_category(&category).await?;
    Ok(Json(ProductList { products }))
}
