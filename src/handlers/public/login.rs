use axum::{extract::State, response::Redirect};

use crate::state::AppState;

/// GET /api/login - send the browser to wherever admin sessions are issued
pub async fn login_redirect(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(state.gate.login_url())
}
