//! Storefront Library
//!
//! This library provides a shopper's cart and wishlist persisted in a
//! key-value store, a client for the remote product catalog, and an HTTP
//! surface exposing both.

// Domain modules
pub mod catalog;
pub mod shop;

// Infrastructure
pub mod config;
pub mod error;
pub mod router;
pub mod state;
pub mod storage;
