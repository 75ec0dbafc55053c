#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use storefront_api::{
    auth::issue_admin_token,
    middleware::JwtAdminGate,
    router,
    store::{CatalogStore, MemoryCatalogStore},
    AppState,
};

pub const TEST_SECRET: &str = "test-admin-secret";
pub const LOGIN_URL: &str = "https://auth.example.com/login";

pub fn admin_token() -> String {
    issue_admin_token(TEST_SECRET, "tests", 1).expect("token")
}

/// Handler state over a fresh in-memory store. The store handle is returned
/// so tests can arrange data directly.
pub fn test_state() -> (AppState, Arc<MemoryCatalogStore>) {
    let store = Arc::new(MemoryCatalogStore::new());
    let dyn_store: Arc<dyn CatalogStore> = store.clone();
    let gate = Arc::new(JwtAdminGate::new(Some(TEST_SECRET.to_string()), LOGIN_URL));
    (AppState::new(dyn_store, gate), store)
}

pub fn test_router() -> (Router, Arc<MemoryCatalogStore>) {
    let (state, store) = test_state();
    (router(state), store)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub raw: Vec<u8>,
    pub body: Value,
}

/// Run one request through the router. Empty bodies decode to `Value::Null`.
pub async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> Result<TestResponse> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let raw = to_bytes(response.into_body(), usize::MAX).await?.to_vec();
    let body = if raw.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&raw).unwrap_or(Value::Null)
    };

    Ok(TestResponse {
        status,
        headers,
        raw,
        body,
    })
}

pub fn product_body(name: &str, category: &str, price: f64) -> Value {
    json!({
        "name": name,
        "description": format!("{name} for everyday use"),
        "price": price,
        "category": category,
        "imageUrl": format!("https://example.com/{}.jpg", name.to_lowercase().replace(' ', "-")),
    })
}

/// Create a product through the API and return its id.
pub async fn create_product(app: &Router, name: &str, category: &str, price: f64) -> Result<i64> {
    let token = admin_token();
    let res = call(
        app,
        Method::POST,
        "/api/products",
        Some(product_body(name, category, price)),
        Some(&token),
    )
    .await?;
    assert_eq!(res.status, StatusCode::CREATED, "create failed: {}", res.body);
    res.body["id"].as_i64().context("created product has no id")
}

pub struct TestApp {
    pub base_url: String,
    pub store: Arc<MemoryCatalogStore>,
}

/// Serve the router on a free local port for the lifetime of the test runtime.
pub async fn spawn_app() -> Result<TestApp> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;

    let (state, store) = test_state();
    let app = router(state);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("test server stopped: {e}");
        }
    });

    Ok(TestApp {
        base_url: format!("http://127.0.0.1:{port}"),
        store,
    })
}
