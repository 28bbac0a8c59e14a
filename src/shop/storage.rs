//! Cart and Wishlist Persistence
//!
//! Each collection lives as one JSON array under a fixed key. Every mutation
//! is a read-modify-write of the whole array. Failures are logged and
//! swallowed: reads degrade to an empty collection and writes have no
//! durable effect, so callers never see a storage error.
//!
//! Mutations take the caller's current copy of the collection. It stands in
//! for the stored one whenever storage cannot be read, or when the last write
//! to that key failed and the stored value is stale. That keeps the session's
//! changes intact while storage is unavailable.

use super::models::{
    Cart, CartLine, Product, ProductId, Quantity, Wishlist, CART_STORAGE_KEY,
    WISHLIST_STORAGE_KEY,
};
use crate::error::StorageError;
use crate::storage::KeyValueStore;
use dashmap::DashSet;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Persistence accessors for the cart and wishlist.
#[derive(Debug, Clone)]
pub struct ShopStorage {
    store: Arc<dyn KeyValueStore>,

    /// Keys whose last write or removal failed.
    unsynced: Arc<DashSet<String>>,
}

impl ShopStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            unsynced: Arc::new(DashSet::new()),
        }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Reads the cart. Absent or unreadable data yields an empty cart.
    pub fn load_cart(&self) -> Cart {
        self.load(CART_STORAGE_KEY)
    }

    /// Overwrites the stored cart with `cart`.
    pub fn persist_cart(&self, cart: &[CartLine]) {
        self.persist(CART_STORAGE_KEY, cart);
    }

    /// Adds `quantity` of `product` to the cart.
    ///
    /// An existing line for the same id has its quantity increased by
    /// `quantity`, saturating at `Quantity::MAX`; otherwise a new line is
    /// appended. The increment itself is not clamped.
    pub fn upsert_cart_line(
        &self,
        current: &[CartLine],
        product: &Product,
        quantity: Quantity,
    ) -> Cart {
        let mut cart = self.load_or(CART_STORAGE_KEY, current);
        match cart.iter_mut().find(|line| line.id() == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => cart.push(CartLine::new(product.clone(), quantity)),
        }
        self.persist_cart(&cart);
        cart
    }

    /// Drops the line for `product_id`, if any.
    pub fn remove_cart_line(&self, current: &[CartLine], product_id: ProductId) -> Cart {
        let mut cart = self.load_or(CART_STORAGE_KEY, current);
        cart.retain(|line| line.id() != product_id);
        self.persist_cart(&cart);
        cart
    }

    /// Sets the quantity of an existing line to `max(1, quantity)`.
    ///
    /// Never removes a line; unknown ids leave the cart unchanged.
    pub fn set_cart_line_quantity(
        &self,
        current: &[CartLine],
        product_id: ProductId,
        quantity: Quantity,
    ) -> Cart {
        let mut cart = self.load_or(CART_STORAGE_KEY, current);
        if let Some(line) = cart.iter_mut().find(|line| line.id() == product_id) {
            line.quantity = quantity.max(1);
        }
        self.persist_cart(&cart);
        cart
    }

    /// Deletes the cart key outright rather than storing an empty array.
    pub fn clear_cart(&self) {
        self.erase(CART_STORAGE_KEY);
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    pub fn load_wishlist(&self) -> Wishlist {
        self.load(WISHLIST_STORAGE_KEY)
    }

    pub fn persist_wishlist(&self, wishlist: &[Product]) {
        self.persist(WISHLIST_STORAGE_KEY, wishlist);
    }

    /// Appends `product` unless its id is already present (first write wins).
    pub fn insert_wishlist_entry(&self, current: &[Product], product: &Product) -> Wishlist {
        let mut wishlist = self.load_or(WISHLIST_STORAGE_KEY, current);
        if !wishlist.iter().any(|entry| entry.id == product.id) {
            wishlist.push(product.clone());
            self.persist_wishlist(&wishlist);
        }
        wishlist
    }

    pub fn remove_wishlist_entry(&self, current: &[Product], product_id: ProductId) -> Wishlist {
        let mut wishlist = self.load_or(WISHLIST_STORAGE_KEY, current);
        wishlist.retain(|entry| entry.id != product_id);
        self.persist_wishlist(&wishlist);
        wishlist
    }

    /// Membership check against the stored wishlist.
    pub fn is_in_wishlist(&self, product_id: ProductId) -> bool {
        self.load_wishlist()
            .iter()
            .any(|entry| entry.id == product_id)
    }

    pub fn clear_wishlist(&self) {
        self.erase(WISHLIST_STORAGE_KEY);
    }

    // =========================================================================
    // JSON plumbing
    // =========================================================================

    fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        match self.try_load(key) {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(key, error = %e, "failed to read collection from storage");
                Vec::new()
            }
        }
    }

    /// Like [`load`](Self::load), but falls back to `current` when the
    /// stored value is unreadable or known to be stale.
    fn load_or<T: DeserializeOwned + Clone>(&self, key: &str, current: &[T]) -> Vec<T> {
        if self.unsynced.contains(key) {
            tracing::debug!(key, "stored collection is stale, using session copy");
            return current.to_vec();
        }
        match self.try_load(key) {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(key, error = %e, "failed to read collection from storage, using session copy");
                current.to_vec()
            }
        }
    }

    fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StorageError> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            key: key.to_string(),
            source,
        })
    }

    fn persist<T: Serialize>(&self, key: &str, items: &[T]) {
        let result = serde_json::to_string(items)
            .map_err(|source| StorageError::Serialize {
                key: key.to_string(),
                source,
            })
            .and_then(|raw| self.store.set(key, &raw));

        match result {
            Ok(()) => {
                self.unsynced.remove(key);
            }
            Err(e) => {
                tracing::error!(key, error = %e, "failed to write collection to storage");
                self.unsynced.insert(key.to_string());
            }
        }
    }

    fn erase(&self, key: &str) {
        match self.store.remove(key) {
            Ok(()) => {
                self.unsynced.remove(key);
            }
            Err(e) => {
                tracing::error!(key, error = %e, "failed to remove collection from storage");
                self.unsynced.insert(key.to_string());
            }
        }
    }
}
