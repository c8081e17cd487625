//! End-to-end tests of the HTTP surface over in-memory backends.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use catalog_api::{ApiContext, build_router};
use catalog_persistence::{
    FEATURED_PRODUCTS_KEY, InMemoryImageHost, InMemoryProductRepository, InMemorySnapshotCache,
};

struct TestApp {
    router: Router,
    cache: Arc<InMemorySnapshotCache>,
    images: Arc<InMemoryImageHost>,
}

fn app() -> TestApp {
    let cache = Arc::new(InMemorySnapshotCache::new());
    let images = Arc::new(InMemoryImageHost::new());
    let ctx = ApiContext::new(
        Arc::new(InMemoryProductRepository::new()),
        cache.clone(),
        images.clone(),
    );

    TestApp {
        router: build_router(ctx, &["*".to_string()]),
        cache,
        images,
    }
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

async fn create(router: &Router, name: &str, category: &str) -> Value {
    let (status, body) = send(
        router,
        Method::POST,
        "/api/products",
        Some(json!({
            "name": name,
            "description": "Soft cotton",
            "price": 25.0,
            "category": category,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["product"].clone()
}

#[tokio::test]
async fn health_check_responds_ok() {
    let app = app();
    let (status, body) = send(&app.router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));
}

#[tokio::test]
async fn empty_catalog_lists_no_products() {
    let app = app();
    let (status, body) = send(&app.router, Method::GET, "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "products": [] }));
}

#[tokio::test]
async fn featured_is_404_when_nothing_featured() {
    let app = app();
    create(&app.router, "Tee", "t-shirts").await;

    let (status, body) = send(&app.router, Method::GET, "/api/products/featured", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No featured products found");
    assert!(app.cache.peek(FEATURED_PRODUCTS_KEY).await.is_none());
}

#[tokio::test]
async fn create_returns_product_with_defaults() {
    let app = app();
    let product = create(&app.router, "Tee", "t-shirts").await;

    assert_eq!(product["name"], "Tee");
    assert_eq!(product["isFeatured"], false);
    assert!(product["_id"].is_string());
    assert!(product["createdAt"].is_string());
    assert_eq!(app.images.call_count(), 0);
}

#[tokio::test]
async fn create_with_image_uploads_once() {
    let app = app();
    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/products",
        Some(json!({
            "name": "Jacket",
            "description": "Warm",
            "price": 120.0,
            "image": "data:image/png;base64,AAAA",
            "category": "jackets",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["product"]["image"].as_str().unwrap().contains("/products/"));
    assert_eq!(app.images.uploads().len(), 1);
}

#[tokio::test]
async fn create_rejects_malformed_body() {
    let app = app();
    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/products",
        Some(json!({ "name": "Tee" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid input");
}

#[tokio::test]
async fn create_rejects_negative_price() {
    let app = app();
    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/products",
        Some(json!({ "name": "Tee", "price": -5.0, "category": "t-shirts" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn toggle_then_read_featured() {
    let app = app();
    let product = create(&app.router, "Tee", "t-shirts").await;
    let id = product["_id"].as_str().unwrap();

    let (status, toggled) =
        send(&app.router, Method::PATCH, &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["isFeatured"], true);

    let (status, featured) = send(&app.router, Method::GET, "/api/products/featured", None).await;
    assert_eq!(status, StatusCode::OK);
    let featured = featured.as_array().unwrap();
    assert_eq!(featured.len(), 1);
    assert_eq!(featured[0]["_id"], id);
}

#[tokio::test]
async fn toggle_unknown_is_404() {
    let app = app();
    let (status, body) = send(
        &app.router,
        Method::PATCH,
        "/api/products/1b4e28ba-2fa1-11d2-883f-0016d3cca427",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
    assert!(app.cache.peek(FEATURED_PRODUCTS_KEY).await.is_none());
}

#[tokio::test]
async fn malformed_id_is_400() {
    let app = app();
    let (status, body) = send(&app.router, Method::DELETE, "/api/products/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid product id");
}

#[tokio::test]
async fn delete_removes_product() {
    let app = app();
    let product = create(&app.router, "Tee", "t-shirts").await;
    let id = product["_id"].as_str().unwrap();

    let (status, body) =
        send(&app.router, Method::DELETE, &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Product deleted" }));
    assert_eq!(app.images.call_count(), 0);

    let (status, _) = send(&app.router, Method::DELETE, &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn category_filter_is_exact() {
    let app = app();
    create(&app.router, "Tee", "t-shirts").await;
    create(&app.router, "Jeans", "jeans").await;

    let (status, body) = send(&app.router, Method::GET, "/api/products/category/jeans", None).await;
    assert_eq!(status, StatusCode::OK);
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Jeans");

    let (_, body) = send(&app.router, Method::GET, "/api/products/category/shoes", None).await;
    assert_eq!(body, json!({ "products": [] }));
}

#[tokio::test]
async fn recommendations_return_at_most_three_summaries() {
    let app = app();
    for i in 0..5 {
        create(&app.router, &format!("Product {i}"), "t-shirts").await;
    }

    let (status, body) = send(&app.router, Method::GET, "/api/products/recommendations", None).await;
    assert_eq!(status, StatusCode::OK);
    let picks = body.as_array().unwrap();
    assert_eq!(picks.len(), 3);
    for pick in picks {
        assert!(pick.get("_id").is_some());
        assert!(pick.get("category").is_none());
        assert!(pick.get("isFeatured").is_none());
    }
}

#[tokio::test]
async fn recommendations_on_small_catalog() {
    let app = app();
    create(&app.router, "Only", "t-shirts").await;

    let (status, body) = send(&app.router, Method::GET, "/api/products/recommendations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn cache_read_failure_is_500() {
    let app = app();
    app.cache.fail_reads(true);

    let (status, body) = send(&app.router, Method::GET, "/api/products/featured", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Server error");
    assert!(body["error"].is_string());
}
