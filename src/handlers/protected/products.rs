// handlers/protected/products.rs - Catalog mutations

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;

use crate::handlers::parse_product_id;
use crate::middleware::{ApiResponse, ApiResult};
use crate::schema::{validate_new_product, validate_product_patch, Product};
use crate::state::AppState;

/// POST /api/products - 201 with the stored record, including generated fields
pub async fn product_create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Product> {
    let Json(payload) = payload?;
    let input = validate_new_product(&payload)?;
    let product = state.store.create_product(input).await?;
    tracing::info!("Created product {} ({})", product.id, product.name);
    Ok(ApiResponse::created(product))
}

/// PATCH /api/products/:id - partial update, 404 when the id is unknown
pub async fn product_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Product> {
    let id = parse_product_id(&id)?;
    let Json(payload) = payload?;
    let patch = validate_product_patch(&payload)?;
    let product = state.store.update_product(id, patch).await?;
    tracing::info!("Updated product {}", product.id);
    Ok(ApiResponse::success(product))
}

/// DELETE /api/products/:id - 200 with an empty body whether or not it existed
pub async fn product_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_product_id(&id)?;
    state.store.delete_product(id).await?;
    tracing::info!("Deleted product {}", id);
    Ok(ApiResponse::empty())
}
