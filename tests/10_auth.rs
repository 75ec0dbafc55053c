mod common;

use anyhow::Result;
use axum::http::{header, Method, StatusCode};
use serde_json::json;

use storefront_api::auth::{generate_jwt, Claims};

#[tokio::test]
async fn admin_routes_reject_missing_session() -> Result<()> {
    let (app, _) = common::test_router();

    let create = common::call(
        &app,
        Method::POST,
        "/api/products",
        Some(common::product_body("Lamp", "Home", 10.0)),
        None,
    )
    .await?;
    assert_eq!(create.status, StatusCode::UNAUTHORIZED);
    assert_eq!(create.body, json!({ "message": "Unauthorized" }));

    let delete = common::call(&app, Method::DELETE, "/api/products/1", None, None).await?;
    assert_eq!(delete.status, StatusCode::UNAUTHORIZED);

    let patch = common::call(
        &app,
        Method::PATCH,
        "/api/products/1",
        Some(json!({ "price": 1.0 })),
        None,
    )
    .await?;
    assert_eq!(patch.status, StatusCode::UNAUTHORIZED);

    let stats = common::call(&app, Method::GET, "/api/admin/stats", None, None).await?;
    assert_eq!(stats.status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn unauthenticated_create_does_not_persist() -> Result<()> {
    let (app, _) = common::test_router();

    common::call(
        &app,
        Method::POST,
        "/api/products",
        Some(common::product_body("Lamp", "Home", 10.0)),
        Some("not-a-jwt"),
    )
    .await?;

    let list = common::call(&app, Method::GET, "/api/products", None, None).await?;
    assert_eq!(list.body, json!([]));
    Ok(())
}

#[tokio::test]
async fn tokens_must_carry_admin_role_and_secret() -> Result<()> {
    let (app, _) = common::test_router();

    let mut claims = Claims::admin("shopper", 1);
    claims.role = "customer".to_string();
    let customer = generate_jwt(common::TEST_SECRET, &claims)?;
    let res = common::call(&app, Method::GET, "/api/admin/stats", None, Some(&customer)).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let forged = generate_jwt("some-other-secret", &Claims::admin("ops", 1))?;
    let res = common::call(&app, Method::GET, "/api/admin/stats", None, Some(&forged)).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let token = common::admin_token();
    let res = common::call(&app, Method::GET, "/api/admin/stats", None, Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn public_routes_need_no_session() -> Result<()> {
    let (app, _) = common::test_router();

    let list = common::call(&app, Method::GET, "/api/products", None, None).await?;
    assert_eq!(list.status, StatusCode::OK);

    let view = common::call(&app, Method::POST, "/api/products/1/view", None, None).await?;
    assert_eq!(view.status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn login_redirects_to_gate_url() -> Result<()> {
    let (app, _) = common::test_router();

    let res = common::call(&app, Method::GET, "/api/login", None, None).await?;
    assert_eq!(res.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        res.headers.get(header::LOCATION).and_then(|v| v.to_str().ok()),
        Some(common::LOGIN_URL)
    );
    Ok(())
}

#[tokio::test]
async fn health_and_root_respond() -> Result<()> {
    let (app, _) = common::test_router();

    let health = common::call(&app, Method::GET, "/health", None, None).await?;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");

    let root = common::call(&app, Method::GET, "/", None, None).await?;
    assert_eq!(root.status, StatusCode::OK);
    assert_eq!(root.body["name"], "Storefront API");
    Ok(())
}
