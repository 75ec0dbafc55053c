mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn create_returns_full_record() -> Result<()> {
    let (app, _) = common::test_router();
    let token = common::admin_token();

    let res = common::call(
        &app,
        Method::POST,
        "/api/products",
        Some(json!({
            "name": "Wireless Headphones",
            "description": "Noise cancelling",
            "price": 99.99,
            "category": "Tech",
            "imageUrl": "https://example.com/headphones.jpg"
        })),
        Some(&token),
    )
    .await?;

    assert_eq!(res.status, StatusCode::CREATED, "body: {}", res.body);
    assert!(res.body["id"].as_i64().is_some());
    assert_eq!(res.body["name"], "Wireless Headphones");
    assert_eq!(res.body["price"], "99.99");
    assert_eq!(res.body["viewCount"], 0);
    assert!(res.body["createdAt"].is_string());
    Ok(())
}

#[tokio::test]
async fn created_ids_are_never_reused() -> Result<()> {
    let (app, _) = common::test_router();
    let token = common::admin_token();

    let first = common::create_product(&app, "First", "Tech", 1.0).await?;
    common::call(&app, Method::DELETE, &format!("/api/products/{first}"), None, Some(&token)).await?;
    let second = common::create_product(&app, "Second", "Tech", 1.0).await?;

    assert_ne!(first, second);
    Ok(())
}

#[tokio::test]
async fn negative_price_is_rejected_on_price_field() -> Result<()> {
    let (app, _) = common::test_router();
    let token = common::admin_token();

    let res = common::call(
        &app,
        Method::POST,
        "/api/products",
        Some(common::product_body("Broken", "Tech", -1.0)),
        Some(&token),
    )
    .await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["field"], "price");
    assert_eq!(res.body["message"], "Price must be positive");
    Ok(())
}

#[tokio::test]
async fn first_failing_field_is_reported() -> Result<()> {
    let (app, _) = common::test_router();
    let token = common::admin_token();

    let res = common::call(
        &app,
        Method::POST,
        "/api/products",
        Some(json!({ "description": "no name", "price": "12.00" })),
        Some(&token),
    )
    .await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, json!({ "message": "Required", "field": "name" }));
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() -> Result<()> {
    let (app, _) = common::test_router();
    let token = common::admin_token();

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/products")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .header(axum::http::header::AUTHORIZATION, format!("Bearer {token}"))
        .body(axum::body::Body::from("{\"name\": "))?;
    let response = tower::ServiceExt::oneshot(app, request).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn detail_read_counts_one_view_per_request() -> Result<()> {
    let (app, _) = common::test_router();
    let id = common::create_product(&app, "Lamp", "Home", 29.99).await?;
    let uri = format!("/api/products/{id}");

    let first = common::call(&app, Method::GET, &uri, None, None).await?;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["viewCount"], 0);

    let second = common::call(&app, Method::GET, &uri, None, None).await?;
    assert_eq!(second.body["viewCount"], 1);

    let view = common::call(&app, Method::POST, &format!("{uri}/view"), None, None).await?;
    assert_eq!(view.status, StatusCode::OK);
    assert!(view.raw.is_empty());

    let third = common::call(&app, Method::GET, &uri, None, None).await?;
    assert_eq!(third.body["viewCount"], 3);
    Ok(())
}

#[tokio::test]
async fn unknown_and_malformed_ids() -> Result<()> {
    let (app, _) = common::test_router();

    let missing = common::call(&app, Method::GET, "/api/products/9999", None, None).await?;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body, json!({ "message": "Product not found" }));

    let malformed = common::call(&app, Method::GET, "/api/products/abc", None, None).await?;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        malformed.body,
        json!({ "message": "Invalid product id", "field": "id" })
    );
    Ok(())
}

#[tokio::test]
async fn deleted_product_disappears() -> Result<()> {
    let (app, _) = common::test_router();
    let token = common::admin_token();
    let keep = common::create_product(&app, "Keep", "Tech", 5.0).await?;
    let gone = common::create_product(&app, "Gone", "Tech", 5.0).await?;
    let uri = format!("/api/products/{gone}");

    let res = common::call(&app, Method::DELETE, &uri, None, Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.raw.is_empty());

    let fetch = common::call(&app, Method::GET, &uri, None, None).await?;
    assert_eq!(fetch.status, StatusCode::NOT_FOUND);

    let list = common::call(&app, Method::GET, "/api/products", None, None).await?;
    let ids: Vec<i64> = list
        .body
        .as_array()
        .map(|items| items.iter().filter_map(|p| p["id"].as_i64()).collect())
        .unwrap_or_default();
    assert_eq!(ids, vec![keep]);

    // Deleting again still succeeds.
    let again = common::call(&app, Method::DELETE, &uri, None, Some(&token)).await?;
    assert_eq!(again.status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn list_is_newest_first_and_filters() -> Result<()> {
    let (app, _) = common::test_router();
    let a = common::create_product(&app, "Headphones", "Tech", 99.99).await?;
    let b = common::create_product(&app, "Screwdriver Set", "Repair Tools", 29.99).await?;
    let c = common::create_product(&app, "Smart Watch", "Tech", 199.5).await?;

    let ids = |body: &serde_json::Value| -> Vec<i64> {
        body.as_array()
            .map(|items| items.iter().filter_map(|p| p["id"].as_i64()).collect())
            .unwrap_or_default()
    };

    let all = common::call(&app, Method::GET, "/api/products", None, None).await?;
    assert_eq!(ids(&all.body), vec![c, b, a]);

    let tech = common::call(&app, Method::GET, "/api/products?category=Tech", None, None).await?;
    assert_eq!(ids(&tech.body), vec![c, a]);

    let partial = common::call(&app, Method::GET, "/api/products?category=Te", None, None).await?;
    assert_eq!(ids(&partial.body), Vec::<i64>::new());

    let search = common::call(&app, Method::GET, "/api/products?search=WATCH", None, None).await?;
    assert_eq!(ids(&search.body), vec![c]);

    let blank = common::call(&app, Method::GET, "/api/products?category=&search=", None, None).await?;
    assert_eq!(ids(&blank.body), vec![c, b, a]);
    Ok(())
}

#[tokio::test]
async fn blank_category_and_image_url_are_stored() -> Result<()> {
    let (app, _) = common::test_router();
    let token = common::admin_token();

    let res = common::call(
        &app,
        Method::POST,
        "/api/products",
        Some(json!({
            "name": "Lamp",
            "description": "",
            "price": 5,
            "category": "",
            "imageUrl": ""
        })),
        Some(&token),
    )
    .await?;
    assert_eq!(res.status, StatusCode::CREATED, "body: {}", res.body);
    assert_eq!(res.body["category"], "");
    assert_eq!(res.body["imageUrl"], "");

    let id = res.body["id"].as_i64().unwrap_or_default();
    let patched = common::call(
        &app,
        Method::PATCH,
        &format!("/api/products/{id}"),
        Some(json!({ "category": "", "imageUrl": "" })),
        Some(&token),
    )
    .await?;
    assert_eq!(patched.status, StatusCode::OK, "body: {}", patched.body);
    Ok(())
}

#[tokio::test]
async fn bad_query_string_answers_json_message() -> Result<()> {
    let (app, _) = common::test_router();

    let res = common::call(
        &app,
        Method::GET,
        "/api/products?category=a&category=b",
        None,
        None,
    )
    .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    let message = res.body["message"].as_str().unwrap_or_default();
    assert!(message.contains("duplicate field"), "body: {}", res.body);
    Ok(())
}

#[tokio::test]
async fn patch_updates_selected_fields() -> Result<()> {
    let (app, _) = common::test_router();
    let token = common::admin_token();
    let id = common::create_product(&app, "Lamp", "Home", 29.99).await?;
    let uri = format!("/api/products/{id}");

    let res = common::call(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({ "price": 24.5, "category": "Lighting" })),
        Some(&token),
    )
    .await?;
    assert_eq!(res.status, StatusCode::OK, "body: {}", res.body);
    assert_eq!(res.body["price"], "24.50");
    assert_eq!(res.body["category"], "Lighting");
    assert_eq!(res.body["name"], "Lamp");

    let bad = common::call(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({ "viewCount": 1000 })),
        Some(&token),
    )
    .await?;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad.body["field"], "viewCount");

    let missing = common::call(
        &app,
        Method::PATCH,
        "/api/products/9999",
        Some(json!({ "name": "Ghost" })),
        Some(&token),
    )
    .await?;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn dashboard_orders_most_viewed() -> Result<()> {
    let (app, _) = common::test_router();
    let token = common::admin_token();

    for (index, views) in [120, 45, 80, 30, 65].into_iter().enumerate() {
        let id = common::create_product(&app, &format!("Product {index}"), "Tech", 10.0).await?;
        let uri = format!("/api/products/{id}/view");
        for _ in 0..views {
            common::call(&app, Method::POST, &uri, None, None).await?;
        }
    }
    common::call(
        &app,
        Method::POST,
        "/api/stats-users",
        Some(json!({ "name": "Ada", "email": "ada@example.com" })),
        None,
    )
    .await?;

    let res = common::call(&app, Method::GET, "/api/admin/stats", None, Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["totalProducts"], 5);
    assert_eq!(res.body["totalUsers"], 1);

    let views: Vec<i64> = res.body["mostViewedProducts"]
        .as_array()
        .map(|items| items.iter().filter_map(|p| p["viewCount"].as_i64()).collect())
        .unwrap_or_default();
    assert_eq!(views, vec![120, 80, 65, 45, 30]);
    Ok(())
}
