//! # Mutation Handlers
//!
//! Write operations for the catalog API.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use catalog_domain::Product;

use super::parse_product_id;
use crate::context::ApiContext;
use crate::error::{ApiError, ApiResult};
use crate::schema::{CreateProductInput, MessageResponse, ProductEnvelope};

// =========================================================================
// PRODUCT MUTATIONS
// =========================================================================

/// `POST /api/products`
pub async fn create_product(
    State(ctx): State<ApiContext>,
    body: Result<Json<CreateProductInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ProductEnvelope>)> {
    let Json(input) = body.map_err(|rejection| ApiError::InvalidInput(rejection.body_text()))?;

    let product = ctx.catalog.create(input.into()).await?;
    Ok((StatusCode::CREATED, Json(ProductEnvelope { product })))
}

/// `DELETE /api/products/{id}`
pub async fn delete_product(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_product_id(&id)?;
    ctx.catalog.delete(id).await?;
    Ok(Json(MessageResponse::new("Product deleted")))
}

/// `PATCH /api/products/{id}`
///
/// Flips `isFeatured` and returns the updated product.
pub async fn toggle_featured(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    let id = parse_product_id(&id)?;
    Ok(Json(ctx.catalog.toggle_featured(id).await?))
}
