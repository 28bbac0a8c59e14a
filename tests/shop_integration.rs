//! Integration tests for the storefront HTTP surface
//!
//! These tests drive the full router against a local stand-in for the remote
//! catalog and verify:
//! - Catalog browsing, search and category filtering
//! - Cart accumulation, quantity clamping, removal and checkout
//! - Wishlist toggling and insert-only saves
//! - Persistence through the key-value store
//! - Degradation when the catalog is unreachable

use axum::body::Body;
use axum::extract::Path;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt; // for `oneshot`

use storefront::catalog::CatalogClient;
use storefront::router::create_app_router;
use storefront::shop::models::{CART_STORAGE_KEY, WISHLIST_STORAGE_KEY};
use storefront::state::AppState;
use storefront::storage::{FileStore, KeyValueStore, MemoryStore};

// =============================================================================
// Fake catalog
// =============================================================================

fn catalog_products() -> Value {
    json!([
        {
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 109.95,
            "description": "Your perfect pack for everyday use and walks in the forest.",
            "category": "men's clothing",
            "image": "https://img.example/1.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        },
        {
            "id": 5,
            "title": "Silver Dragon Station Chain Bracelet",
            "price": 695,
            "description": "From our Legends Collection.",
            "category": "jewelery",
            "image": "https://img.example/5.jpg",
            "rating": { "rate": 4.6, "count": 400 }
        },
        {
            "id": 9,
            "title": "WD 2TB Elements Portable External Hard Drive",
            "price": 64.0,
            "description": "USB 3.0 and USB 2.0 compatibility.",
            "category": "electronics",
            "image": "https://img.example/9.jpg",
            "rating": { "rate": 3.3, "count": 203 }
        }
    ])
}

fn fake_catalog_router() -> Router {
    async fn products() -> Json<Value> {
        Json(catalog_products())
    }

    // One wildcard route keeps `categories`, `category/{name}` and `{id}`
    // from competing for the same path segment.
    async fn under_products(Path(rest): Path<String>) -> Result<Json<Value>, StatusCode> {
        if rest == "categories" {
            return Ok(Json(json!(["electronics", "jewelery", "men's clothing"])));
        }
        let all = catalog_products().as_array().cloned().unwrap_or_default();

        if let Some(name) = rest.strip_prefix("category/") {
            let matching: Vec<Value> = all
                .into_iter()
                .filter(|p| p["category"] == name)
                .collect();
            return Ok(Json(Value::Array(matching)));
        }

        let id: u64 = rest.parse().map_err(|_| StatusCode::BAD_REQUEST)?;
        all.into_iter()
            .find(|p| p["id"] == id)
            .map(Json)
            .ok_or(StatusCode::NOT_FOUND)
    }

    Router::new()
        .route("/products", get(products))
        .route("/products/*rest", get(under_products))
}

/// Serves the fake catalog on an ephemeral local port and returns its base URL.
async fn spawn_catalog() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, fake_catalog_router()).await.unwrap();
    });
    format!("http://{addr}")
}

// =============================================================================
// Helpers
// =============================================================================

struct TestApp {
    router: Router,
    store: Arc<MemoryStore>,
}

async fn create_test_app() -> TestApp {
    let base = spawn_catalog().await;
    let store = Arc::new(MemoryStore::new());
    let state = Arc::new(AppState::new(
        store.clone(),
        CatalogClient::new(base, Duration::from_secs(5)),
    ));
    TestApp {
        router: create_app_router(state),
        store,
    }
}

/// Helper function to send a request with an optional JSON body
async fn send_request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!({}));

    (status, body)
}

fn ids(items: &Value) -> Vec<u64> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_u64().unwrap())
        .collect()
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_list_and_filter_products() {
    let app = create_test_app().await;

    let (status, body) = send_request(&app.router, "GET", "/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 5, 9]);

    let (_, body) = send_request(&app.router, "GET", "/products?search=USB", None).await;
    assert_eq!(ids(&body), vec![9]);

    let (_, body) = send_request(&app.router, "GET", "/products?category=jewelery", None).await;
    assert_eq!(ids(&body), vec![5]);

    let (_, body) = send_request(
        &app.router,
        "GET",
        "/products?category=jewelery&search=backpack",
        None,
    )
    .await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_product_detail_and_not_found() {
    let app = create_test_app().await;

    let (status, body) = send_request(&app.router, "GET", "/products/5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Silver Dragon Station Chain Bracelet");
    assert_eq!(body["price"], 695.0);

    let (status, body) = send_request(&app.router, "GET", "/products/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "product 404 not found");
}

#[tokio::test]
async fn test_categories_and_category_products() {
    let app = create_test_app().await;

    let (status, body) = send_request(&app.router, "GET", "/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["electronics", "jewelery", "men's clothing"]));

    let (status, body) = send_request(
        &app.router,
        "GET",
        "/categories/men's%20clothing/products",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1]);
}

#[tokio::test]
async fn test_browse_returns_products_and_categories() {
    let app = create_test_app().await;

    let (status, body) = send_request(&app.router, "GET", "/browse?search=silver", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(ids(&body["products"]), vec![5]);
    assert_eq!(body["categories"].as_array().unwrap().len(), 3);
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_cart_add_accumulate_remove() {
    let app = create_test_app().await;

    let (status, body) = send_request(
        &app.router,
        "POST",
        "/cart/items",
        Some(json!({ "productId": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["total"], 64.0);

    let (_, body) = send_request(
        &app.router,
        "POST",
        "/cart/items",
        Some(json!({ "productId": 9, "quantity": 2 })),
    )
    .await;
    assert_eq!(body["count"], 3);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["quantity"], 3);
    assert_eq!(body["total"], 192.0);

    let (status, body) = send_request(&app.router, "DELETE", "/cart/items/9", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert!(body["items"].as_array().unwrap().is_empty());

    let (_, notes) = send_request(&app.router, "GET", "/notifications", None).await;
    let messages: Vec<&str> = notes
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["message"].as_str().unwrap())
        .collect();
    assert_eq!(
        messages,
        vec![
            "WD 2TB Elements Port... added to cart",
            "WD 2TB Elements Port... added to cart",
            "Item removed from cart",
        ]
    );

    let (_, notes) = send_request(&app.router, "GET", "/notifications", None).await;
    assert!(notes.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_add_rejects_bad_input() {
    let app = create_test_app().await;

    let (status, _) = send_request(
        &app.router,
        "POST",
        "/cart/items",
        Some(json!({ "productId": 9, "quantity": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_request(
        &app.router,
        "POST",
        "/cart/items",
        Some(json!({ "productId": 12345 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, cart) = send_request(&app.router, "GET", "/cart", None).await;
    assert_eq!(cart["count"], 0);
    assert!(!app.store.contains_key(CART_STORAGE_KEY));
}

#[tokio::test]
async fn test_huge_quantities_saturate() {
    let app = create_test_app().await;

    for quantity in [i64::MAX, 1] {
        let (status, _) = send_request(
            &app.router,
            "POST",
            "/cart/items",
            Some(json!({ "productId": 9, "quantity": quantity })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, cart) = send_request(&app.router, "GET", "/cart", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["count"], i64::MAX);
    assert_eq!(cart["items"][0]["quantity"], i64::MAX);

    // The shop keeps serving requests afterwards.
    let (status, _) = send_request(
        &app.router,
        "POST",
        "/cart/items",
        Some(json!({ "productId": 1, "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_quantity_clamps() {
    let app = create_test_app().await;
    send_request(
        &app.router,
        "POST",
        "/cart/items",
        Some(json!({ "productId": 1, "quantity": 2 })),
    )
    .await;

    let (status, body) = send_request(
        &app.router,
        "PATCH",
        "/cart/items/1",
        Some(json!({ "quantity": -3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["quantity"], 1);
    assert_eq!(body["count"], 1);

    // Unknown ids leave the cart untouched.
    let (_, body) = send_request(
        &app.router,
        "PATCH",
        "/cart/items/77",
        Some(json!({ "quantity": 4 })),
    )
    .await;
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn test_cart_is_persisted_as_flat_json() {
    let app = create_test_app().await;
    send_request(
        &app.router,
        "POST",
        "/cart/items",
        Some(json!({ "productId": 5, "quantity": 2 })),
    )
    .await;

    let raw = app.store.get(CART_STORAGE_KEY).unwrap().unwrap();
    let stored: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored[0]["id"], 5);
    assert_eq!(stored[0]["quantity"], 2);
    assert_eq!(stored[0]["rating"]["rate"], 4.6);

    let (status, body) = send_request(&app.router, "DELETE", "/cart", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert!(!app.store.contains_key(CART_STORAGE_KEY));
}

#[tokio::test]
async fn test_checkout() {
    let app = create_test_app().await;

    let (status, body) = send_request(&app.router, "POST", "/checkout", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "cart is empty");

    send_request(
        &app.router,
        "POST",
        "/cart/items",
        Some(json!({ "productId": 9, "quantity": 2 })),
    )
    .await;
    send_request(
        &app.router,
        "POST",
        "/cart/items",
        Some(json!({ "productId": 5 })),
    )
    .await;
    send_request(&app.router, "GET", "/notifications", None).await;

    let (status, receipt) = send_request(&app.router, "POST", "/checkout", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(receipt["count"], 3);
    assert_eq!(receipt["total"], 823.0);
    assert_eq!(receipt["items"].as_array().unwrap().len(), 2);
    assert!(receipt["summary"]
        .as_str()
        .unwrap()
        .starts_with("2x WD 2TB Elements"));

    let (_, cart) = send_request(&app.router, "GET", "/cart", None).await;
    assert_eq!(cart["count"], 0);

    let (_, notes) = send_request(&app.router, "GET", "/notifications", None).await;
    assert_eq!(notes[0]["message"], "Order placed successfully!");
    assert_eq!(notes[0]["severity"], "success");
    assert_eq!(notes[1]["message"], "Cart cleared");
    assert_eq!(notes[1]["severity"], "info");
}

// =============================================================================
// Wishlist
// =============================================================================

#[tokio::test]
async fn test_wishlist_toggle() {
    let app = create_test_app().await;

    let (status, body) = send_request(
        &app.router,
        "POST",
        "/wishlist/items",
        Some(json!({ "productId": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["inWishlist"], true);
    assert_eq!(ids(&body["items"]), vec![5]);

    let (_, body) = send_request(&app.router, "GET", "/wishlist/items/5", None).await;
    assert_eq!(body["inWishlist"], true);

    let (_, body) = send_request(
        &app.router,
        "POST",
        "/wishlist/items",
        Some(json!({ "productId": 5 })),
    )
    .await;
    assert_eq!(body["inWishlist"], false);

    let (_, body) = send_request(&app.router, "GET", "/wishlist/items/5", None).await;
    assert_eq!(body["inWishlist"], false);
    assert_eq!(
        app.store.get(WISHLIST_STORAGE_KEY).unwrap().as_deref(),
        Some("[]")
    );
}

#[tokio::test]
async fn test_wishlist_save_remove_clear() {
    let app = create_test_app().await;

    for _ in 0..2 {
        let (status, body) = send_request(&app.router, "PUT", "/wishlist/items/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body["items"]), vec![1]);
    }
    send_request(&app.router, "PUT", "/wishlist/items/9", None).await;

    let (_, body) = send_request(&app.router, "DELETE", "/wishlist/items/1", None).await;
    assert_eq!(ids(&body["items"]), vec![9]);

    let (status, body) = send_request(&app.router, "DELETE", "/wishlist", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["items"].as_array().unwrap().is_empty());
    assert!(!app.store.contains_key(WISHLIST_STORAGE_KEY));

    let (status, _) = send_request(&app.router, "PUT", "/wishlist/items/31337", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Persistence & degradation
// =============================================================================

#[tokio::test]
async fn test_file_store_survives_restart() {
    let base = spawn_catalog().await;
    let dir = std::env::temp_dir().join(format!("storefront-it-{}", uuid::Uuid::new_v4().simple()));

    {
        let store = Arc::new(FileStore::open(&dir).unwrap());
        let state = Arc::new(AppState::new(
            store,
            CatalogClient::new(base.clone(), Duration::from_secs(5)),
        ));
        let app = create_app_router(state);
        send_request(
            &app,
            "POST",
            "/cart/items",
            Some(json!({ "productId": 1, "quantity": 2 })),
        )
        .await;
        send_request(
            &app,
            "POST",
            "/wishlist/items",
            Some(json!({ "productId": 9 })),
        )
        .await;
    }

    let store = Arc::new(FileStore::open(&dir).unwrap());
    let state = Arc::new(AppState::new(
        store,
        CatalogClient::new(base, Duration::from_secs(5)),
    ));
    let app = create_app_router(state);

    let (_, cart) = send_request(&app, "GET", "/cart", None).await;
    assert_eq!(cart["count"], 2);
    assert_eq!(cart["total"], 219.9);
    let (_, body) = send_request(&app, "GET", "/wishlist/items/9", None).await;
    assert_eq!(body["inWishlist"], true);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_corrupt_storage_starts_empty() {
    let base = spawn_catalog().await;
    let store = Arc::new(MemoryStore::new());
    store.set(CART_STORAGE_KEY, "not json at all").unwrap();

    let state = Arc::new(AppState::new(
        store.clone(),
        CatalogClient::new(base, Duration::from_secs(5)),
    ));
    let app = create_app_router(state);

    let (status, cart) = send_request(&app, "GET", "/cart", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["count"], 0);

    let (_, cart) = send_request(
        &app,
        "POST",
        "/cart/items",
        Some(json!({ "productId": 5 })),
    )
    .await;
    assert_eq!(cart["count"], 1);
}

#[tokio::test]
async fn test_unreachable_catalog_degrades() {
    // Bind then drop a listener so the port is very likely closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let state = Arc::new(AppState::new(
        Arc::new(MemoryStore::new()),
        CatalogClient::new(format!("http://{addr}"), Duration::from_secs(2)),
    ));
    let app = create_app_router(state);

    let (status, body) = send_request(&app, "GET", "/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let (status, body) = send_request(&app, "GET", "/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let (status, _) = send_request(
        &app,
        "POST",
        "/cart/items",
        Some(json!({ "productId": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
