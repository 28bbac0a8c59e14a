//! Product Catalog Module
//!
//! This module covers everything read from the remote catalog:
//! - REST client with empty-on-failure semantics
//! - Search and category filtering
//! - Browsing route handlers

pub mod client;
pub mod handlers;
pub mod models;

// Re-export commonly used types for convenience
pub use client::{CatalogClient, DEFAULT_CATALOG_URL};
pub use handlers::routes;
pub use models::{BrowseResult, ProductQuery};
