// handlers/public/signups.rs - Marketing signup capture

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use crate::middleware::{ApiResponse, ApiResult};
use crate::schema::{validate_new_signup, SignupUser};
use crate::state::AppState;

/// POST /api/stats-users - 201 with the stored record.
///
/// A duplicate email is a 400 with the same shape as a validation failure.
pub async fn signup_post(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<SignupUser> {
    let Json(payload) = payload?;
    let signup = validate_new_signup(&payload)?;
    let user = state.store.create_signup(signup).await?;
    tracing::info!("Captured signup {}", user.id);
    Ok(ApiResponse::created(user))
}
