//! Remote Catalog Client
//!
//! Read-only access to the product catalog REST API. Every public method
//! degrades to an empty result (or `None`) on failure after logging it, so
//! callers only ever see populated or empty data.

use super::models::{BrowseResult, ProductQuery};
use crate::error::CatalogError;
use crate::shop::models::{Product, ProductId};
use futures_util::future::join;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Catalog used when no override is configured.
pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com";

#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    http: reqwest::Client,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, ?timeout, "failed to build catalog client, using defaults without timeout");
                reqwest::Client::new()
            });
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /products`
    pub async fn fetch_products(&self) -> Vec<Product> {
        self.get_json(&["products"]).await.unwrap_or_else(|e| {
            tracing::error!(error = %e, "error fetching products");
            Vec::new()
        })
    }

    /// `GET /products/{id}`. A missing or undecodable product is `None`.
    pub async fn fetch_product(&self, id: ProductId) -> Option<Product> {
        let id = id.to_string();
        match self.get_json(&["products", id.as_str()]).await {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::error!(product_id = %id, error = %e, "error fetching product");
                None
            }
        }
    }

    /// `GET /products/categories`
    pub async fn fetch_categories(&self) -> Vec<String> {
        self.get_json(&["products", "categories"])
            .await
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "error fetching categories");
                Vec::new()
            })
    }

    /// `GET /products/category/{name}`
    pub async fn fetch_products_by_category(&self, category: &str) -> Vec<Product> {
        self.get_json(&["products", "category", category])
            .await
            .unwrap_or_else(|e| {
                tracing::error!(category, error = %e, "error fetching products in category");
                Vec::new()
            })
    }

    /// Fetches products and categories together and applies `query`.
    pub async fn browse(&self, query: &ProductQuery) -> BrowseResult {
        let (products, categories) = join(self.fetch_products(), self.fetch_categories()).await;
        let products = query.apply(&products);
        BrowseResult {
            total: products.len(),
            products,
            categories,
        }
    }

    fn url_for(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| CatalogError::InvalidUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidUrl {
                url: self.base_url.clone(),
                reason: "cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, CatalogError> {
        let url = self.url_for(segments)?;
        tracing::debug!(%url, "catalog request");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| CatalogError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                url: url.to_string(),
                status,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| CatalogError::Decode {
                url: url.to_string(),
                source,
            })
    }
}
