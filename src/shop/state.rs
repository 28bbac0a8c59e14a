//! Shop State
//!
//! The session's in-memory view of the cart and wishlist. It loads both
//! collections once at construction, and every mutation writes through the
//! persistence accessors before the in-memory copy is replaced with what
//! they return. The in-memory copy is handed to each accessor so it survives
//! storage failures.
//!
//! ## Operation Flow
//! ```text
//! user action ──► ShopState::op ──► ShopStorage (load → change → persist)
//!                      │                               │
//!                      │◄──────── updated collection ──┘
//!                      ▼
//!                 Notifier (success / info)
//! ```

use super::helpers::{cart_count, cart_total, format_item_summary, title_preview};
use super::models::{Cart, CartLine, Product, ProductId, Quantity, Receipt, Wishlist};
use super::notify::{Notification, Notifier};
use super::storage::ShopStorage;
use std::sync::Arc;

pub struct ShopState {
    storage: ShopStorage,
    notifier: Arc<dyn Notifier>,
    cart: Cart,
    wishlist: Wishlist,
}

impl std::fmt::Debug for ShopState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopState")
            .field("cart", &self.cart)
            .field("wishlist", &self.wishlist)
            .finish_non_exhaustive()
    }
}

impl ShopState {
    /// Loads the persisted cart and wishlist.
    pub fn new(storage: ShopStorage, notifier: Arc<dyn Notifier>) -> Self {
        let cart = storage.load_cart();
        let wishlist = storage.load_wishlist();
        tracing::debug!(
            cart_lines = cart.len(),
            wishlist_entries = wishlist.len(),
            "shop state loaded"
        );
        Self {
            storage,
            notifier,
            cart,
            wishlist,
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn cart(&self) -> &[CartLine] {
        &self.cart
    }

    pub fn wishlist(&self) -> &[Product] {
        &self.wishlist
    }

    /// Sum of `price * quantity` over the cart.
    pub fn cart_total(&self) -> f64 {
        cart_total(&self.cart)
    }

    /// Sum of quantities over the cart.
    pub fn cart_count(&self) -> Quantity {
        cart_count(&self.cart)
    }

    /// Number of distinct products in the cart.
    pub fn cart_len(&self) -> usize {
        self.cart.len()
    }

    /// In-memory membership check; does not touch storage.
    pub fn is_in_wishlist(&self, product_id: ProductId) -> bool {
        self.wishlist.iter().any(|entry| entry.id == product_id)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    pub fn add_to_cart(&mut self, product: &Product, quantity: Quantity) {
        self.cart = self.storage.upsert_cart_line(&self.cart, product, quantity);
        tracing::debug!(product_id = product.id, quantity, "added to cart");
        self.notify(Notification::success(format!(
            "{} added to cart",
            title_preview(&product.title)
        )));
    }

    /// Notifies even when `product_id` was not in the cart.
    pub fn remove_from_cart(&mut self, product_id: ProductId) {
        self.cart = self.storage.remove_cart_line(&self.cart, product_id);
        tracing::debug!(product_id, "removed from cart");
        self.notify(Notification::info("Item removed from cart"));
    }

    /// Sets a line's quantity, clamped to at least 1. Silent.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: Quantity) {
        self.cart = self
            .storage
            .set_cart_line_quantity(&self.cart, product_id, quantity);
        tracing::debug!(product_id, quantity, "cart quantity updated");
    }

    pub fn clear_cart(&mut self) {
        self.storage.clear_cart();
        self.cart.clear();
        self.notify(Notification::info("Cart cleared"));
    }

    /// Places the order for the current cart and empties it.
    ///
    /// Returns `None` without side effects when the cart is empty.
    pub fn checkout(&mut self) -> Option<Receipt> {
        if self.cart.is_empty() {
            return None;
        }

        let receipt = Receipt {
            total: self.cart_total(),
            count: self.cart_count(),
            summary: format_item_summary(&self.cart),
            items: self.cart.clone(),
        };
        tracing::info!(
            lines = receipt.items.len(),
            total = receipt.total,
            summary = %receipt.summary,
            "checkout"
        );

        self.notify(Notification::success("Order placed successfully!"));
        self.clear_cart();
        Some(receipt)
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// Toggles `product` in the wishlist and returns whether it is now a
    /// member. Membership is decided from the in-memory wishlist.
    pub fn add_to_wishlist(&mut self, product: &Product) -> bool {
        if self.is_in_wishlist(product.id) {
            self.wishlist = self
                .storage
                .remove_wishlist_entry(&self.wishlist, product.id);
            self.notify(Notification::info(format!(
                "{} removed from wishlist",
                title_preview(&product.title)
            )));
            false
        } else {
            self.save_to_wishlist(product);
            true
        }
    }

    /// Inserts `product` without toggling. Does nothing if already present.
    pub fn save_to_wishlist(&mut self, product: &Product) {
        if self.is_in_wishlist(product.id) {
            return;
        }
        self.wishlist = self.storage.insert_wishlist_entry(&self.wishlist, product);
        self.notify(Notification::success(format!(
            "{} added to wishlist",
            title_preview(&product.title)
        )));
    }

    pub fn remove_from_wishlist(&mut self, product_id: ProductId) {
        self.wishlist = self
            .storage
            .remove_wishlist_entry(&self.wishlist, product_id);
        self.notify(Notification::info("Item removed from wishlist"));
    }

    pub fn clear_wishlist(&mut self) {
        self.storage.clear_wishlist();
        self.wishlist.clear();
        self.notify(Notification::info("Wishlist cleared"));
    }

    fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }
}
