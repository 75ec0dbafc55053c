use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{get, patch, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::api::routes;
use crate::config::AppConfig;
use crate::handlers::{protected, public};
use crate::middleware::require_admin;
use crate::state::AppState;

/// Full HTTP surface. Admin-only methods are gated per route, so public and
/// protected methods can share a path.
pub fn router(state: AppState) -> Router {
    let admin = middleware::from_fn_with_state(state.clone(), require_admin);

    Router::new()
        // Public
        .route("/", get(root))
        .route(routes::HEALTH, get(health))
        .route(routes::LOGIN, get(public::login_redirect))
        .route(
            routes::PRODUCTS,
            get(public::products_list)
                .merge(post(protected::product_create).route_layer(admin.clone())),
        )
        .route(
            routes::PRODUCT,
            get(public::product_get).merge(
                patch(protected::product_update)
                    .delete(protected::product_delete)
                    .route_layer(admin.clone()),
            ),
        )
        .route(routes::PRODUCT_VIEW, post(public::product_view))
        .route(routes::STATS_USERS, post(public::signup_post))
        // Admin only
        .route(routes::ADMIN_STATS, get(protected::admin_stats).route_layer(admin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Router plus the deployment-dependent layers.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let app = router(state).layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    match cors_layer(config) {
        Some(cors) => app.layer(cors),
        None => app,
    }
}

fn cors_layer(config: &AppConfig) -> Option<CorsLayer> {
    if !config.security.enable_cors {
        return None;
    }

    let origins = &config.security.cors_origins;
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    Some(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
    )
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Storefront API",
        "version": version,
        "description": "Product catalog, signup capture and admin dashboard",
        "endpoints": {
            "products": "/api/products[/:id] (GET public; POST, PATCH, DELETE admin)",
            "views": "/api/products/:id/view (public)",
            "signups": "/api/stats-users (public)",
            "stats": "/api/admin/stats (admin)",
            "login": "/api/login (redirect)",
            "health": "/health"
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "message": "database unavailable"
                })),
            )
        }
    }
}
