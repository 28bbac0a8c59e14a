//! Shop Domain Module
//!
//! This module contains the shopper's cart and wishlist, including:
//! - Domain models (Product, CartLine, Receipt)
//! - Persistence accessors over a key-value store
//! - The session state with derived totals
//! - User feedback notifications
//! - REST API handlers

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod notify;
pub mod state;
pub mod storage;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use models::{CartLine, Product, ProductId, Quantity, Rating, Receipt};
pub use notify::{Notification, NotificationQueue, Notifier, Severity, TracingNotifier};
pub use state::ShopState;
pub use storage::ShopStorage;
