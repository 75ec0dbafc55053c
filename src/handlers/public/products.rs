// handlers/public/products.rs - Catalog reads and view tracking

use axum::extract::{rejection::QueryRejection, Path, Query, State};

use crate::error::ApiError;
use crate::handlers::parse_product_id;
use crate::middleware::{ApiResponse, ApiResult};
use crate::schema::{Product, ProductFilter};
use crate::state::AppState;

/// GET /api/products?category=&search= - newest first, possibly empty
pub async fn products_list(
    State(state): State<AppState>,
    query: Result<Query<ProductFilter>, QueryRejection>,
) -> ApiResult<Vec<Product>> {
    let Query(filter) = query?;
    let products = state.store.list_products(&filter.normalized()).await?;
    tracing::debug!("Listed {} products for {:?}", products.len(), filter);
    Ok(ApiResponse::success(products))
}

/// GET /api/products/:id - returns the record, then counts the view.
///
/// The body carries the count as read, before this request's increment.
pub async fn product_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Product> {
    let id = parse_product_id(&id)?;
    let product = state
        .store
        .get_product(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    state.store.increment_product_view(id).await?;
    Ok(ApiResponse::success(product))
}

/// POST /api/products/:id/view - 200 with an empty body
pub async fn product_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_product_id(&id)?;
    state.store.increment_product_view(id).await?;
    Ok(ApiResponse::empty())
}
