//! Catalog route handlers
//!
//! Browsing endpoints backed by the remote catalog. Failures upstream show
//! up here as empty listings, except for single-product lookups which
//! answer 404.

use super::models::{BrowseResult, ProductQuery};
use crate::error::{ApiError, ApiResult};
use crate::shop::models::{Product, ProductId};
use crate::state::SharedState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

/// Creates routes for catalog browsing
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product))
        .route("/categories", get(list_categories))
        .route("/categories/:name/products", get(list_category_products))
        .route("/browse", get(browse))
}

/// Endpoint: GET /products?search=&category=
async fn list_products(
    State(state): State<SharedState>,
    Query(query): Query<ProductQuery>,
) -> Json<Vec<Product>> {
    let products = state.catalog.fetch_products().await;
    Json(query.apply(&products))
}

/// Endpoint: GET /products/:id
async fn get_product(
    State(state): State<SharedState>,
    Path(id): Path<ProductId>,
) -> ApiResult<Json<Product>> {
    state
        .catalog
        .fetch_product(id)
        .await
        .map(Json)
        .ok_or(ApiError::ProductNotFound(id))
}

/// Endpoint: GET /categories
async fn list_categories(State(state): State<SharedState>) -> Json<Vec<String>> {
    Json(state.catalog.fetch_categories().await)
}

/// Endpoint: GET /categories/:name/products
async fn list_category_products(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Json<Vec<Product>> {
    Json(state.catalog.fetch_products_by_category(&name).await)
}

/// Endpoint: GET /browse?search=&category=
async fn browse(
    State(state): State<SharedState>,
    Query(query): Query<ProductQuery>,
) -> Json<BrowseResult> {
    Json(state.catalog.browse(&query).await)
}
