use axum::extract::State;

use crate::middleware::{ApiResponse, ApiResult};
use crate::schema::DashboardStats;
use crate::state::AppState;

/// GET /api/admin/stats - exact counts plus the five most viewed products
pub async fn admin_stats(State(state): State<AppState>) -> ApiResult<DashboardStats> {
    let stats = state.store.dashboard_stats().await?;
    Ok(ApiResponse::success(stats))
}
