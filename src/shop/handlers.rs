//! REST API handlers for cart and wishlist operations
//!
//! Thin adapters from HTTP to [`ShopState`](super::ShopState). Products are
//! looked up in the catalog by id before being added, so clients only send
//! identifiers.

use super::models::{CartLine, Product, ProductId, Quantity, Receipt};
use super::notify::Notification;
use super::state::ShopState;
use crate::error::{ApiError, ApiResult};
use crate::state::SharedState;
use axum::{
    extract::{Path, State},
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

/// Creates routes for cart, wishlist and notification operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart", get(get_cart).delete(clear_cart))
        .route("/cart/items", post(add_to_cart))
        .route(
            "/cart/items/:id",
            patch(update_quantity).delete(remove_from_cart),
        )
        .route("/checkout", post(checkout))
        .route("/wishlist", get(get_wishlist).delete(clear_wishlist))
        .route("/wishlist/items", post(toggle_wishlist))
        .route(
            "/wishlist/items/:id",
            get(wishlist_membership)
                .put(save_to_wishlist)
                .delete(remove_from_wishlist),
        )
        .route("/notifications", get(drain_notifications))
}

// =============================================================================
// Request / Response Models
// =============================================================================

fn default_add_quantity() -> Quantity {
    1
}

/// Body of POST /cart/items
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: ProductId,

    /// Defaults to 1
    #[serde(default = "default_add_quantity")]
    pub quantity: Quantity,
}

/// Body of PATCH /cart/items/:id
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: Quantity,
}

/// Body of POST /wishlist/items
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistRequest {
    pub product_id: ProductId,
}

#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub total: f64,
    pub count: Quantity,
}

impl From<&ShopState> for CartView {
    fn from(shop: &ShopState) -> Self {
        CartView {
            items: shop.cart().to_vec(),
            total: shop.cart_total(),
            count: shop.cart_count(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WishlistView {
    pub items: Vec<Product>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistToggle {
    pub in_wishlist: bool,
    pub items: Vec<Product>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistMembership {
    pub in_wishlist: bool,
}

// =============================================================================
// Cart
// =============================================================================

/// Endpoint: GET /cart
async fn get_cart(State(state): State<SharedState>) -> ApiResult<Json<CartView>> {
    let shop = state.shop()?;
    Ok(Json(CartView::from(&*shop)))
}

/// Endpoint: POST /cart/items
async fn add_to_cart(
    State(state): State<SharedState>,
    Json(payload): Json<AddToCartRequest>,
) -> ApiResult<Json<CartView>> {
    if payload.quantity < 1 {
        return Err(ApiError::InvalidQuantity(payload.quantity));
    }
    let product = fetch_product(&state, payload.product_id).await?;

    let mut shop = state.shop()?;
    shop.add_to_cart(&product, payload.quantity);
    Ok(Json(CartView::from(&*shop)))
}

/// Endpoint: PATCH /cart/items/:id
async fn update_quantity(
    State(state): State<SharedState>,
    Path(id): Path<ProductId>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> ApiResult<Json<CartView>> {
    let mut shop = state.shop()?;
    shop.update_quantity(id, payload.quantity);
    Ok(Json(CartView::from(&*shop)))
}

/// Endpoint: DELETE /cart/items/:id
async fn remove_from_cart(
    State(state): State<SharedState>,
    Path(id): Path<ProductId>,
) -> ApiResult<Json<CartView>> {
    let mut shop = state.shop()?;
    shop.remove_from_cart(id);
    Ok(Json(CartView::from(&*shop)))
}

/// Endpoint: DELETE /cart
async fn clear_cart(State(state): State<SharedState>) -> ApiResult<Json<CartView>> {
    let mut shop = state.shop()?;
    shop.clear_cart();
    Ok(Json(CartView::from(&*shop)))
}

/// Endpoint: POST /checkout
/// Places the order and empties the cart.
async fn checkout(State(state): State<SharedState>) -> ApiResult<Json<Receipt>> {
    let mut shop = state.shop()?;
    shop.checkout().map(Json).ok_or(ApiError::EmptyCart)
}

// =============================================================================
// Wishlist
// =============================================================================

/// Endpoint: GET /wishlist
async fn get_wishlist(State(state): State<SharedState>) -> ApiResult<Json<WishlistView>> {
    let shop = state.shop()?;
    Ok(Json(WishlistView {
        items: shop.wishlist().to_vec(),
    }))
}

/// Endpoint: POST /wishlist/items
/// Adds the product, or removes it when it is already saved.
async fn toggle_wishlist(
    State(state): State<SharedState>,
    Json(payload): Json<WishlistRequest>,
) -> ApiResult<Json<WishlistToggle>> {
    let product = fetch_product(&state, payload.product_id).await?;

    let mut shop = state.shop()?;
    let in_wishlist = shop.add_to_wishlist(&product);
    Ok(Json(WishlistToggle {
        in_wishlist,
        items: shop.wishlist().to_vec(),
    }))
}

/// Endpoint: PUT /wishlist/items/:id
/// Saves the product without toggling; already saved products are left alone.
async fn save_to_wishlist(
    State(state): State<SharedState>,
    Path(id): Path<ProductId>,
) -> ApiResult<Json<WishlistView>> {
    let product = fetch_product(&state, id).await?;

    let mut shop = state.shop()?;
    shop.save_to_wishlist(&product);
    Ok(Json(WishlistView {
        items: shop.wishlist().to_vec(),
    }))
}

/// Endpoint: GET /wishlist/items/:id
async fn wishlist_membership(
    State(state): State<SharedState>,
    Path(id): Path<ProductId>,
) -> ApiResult<Json<WishlistMembership>> {
    let shop = state.shop()?;
    Ok(Json(WishlistMembership {
        in_wishlist: shop.is_in_wishlist(id),
    }))
}

/// Endpoint: DELETE /wishlist/items/:id
async fn remove_from_wishlist(
    State(state): State<SharedState>,
    Path(id): Path<ProductId>,
) -> ApiResult<Json<WishlistView>> {
    let mut shop = state.shop()?;
    shop.remove_from_wishlist(id);
    Ok(Json(WishlistView {
        items: shop.wishlist().to_vec(),
    }))
}

/// Endpoint: DELETE /wishlist
async fn clear_wishlist(State(state): State<SharedState>) -> ApiResult<Json<WishlistView>> {
    let mut shop = state.shop()?;
    shop.clear_wishlist();
    Ok(Json(WishlistView { items: Vec::new() }))
}

// =============================================================================
// Notifications
// =============================================================================

/// Endpoint: GET /notifications
/// Returns and forgets everything queued since the last call.
async fn drain_notifications(State(state): State<SharedState>) -> Json<Vec<Notification>> {
    Json(state.notifications.drain())
}

async fn fetch_product(state: &SharedState, id: ProductId) -> ApiResult<Product> {
    state
        .catalog
        .fetch_product(id)
        .await
        .ok_or(ApiError::ProductNotFound(id))
}
