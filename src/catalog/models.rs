//! Catalog Browsing Models
//!
//! Search and category filtering applied to products fetched from the
//! catalog, plus the response shapes of the catalog routes.

use crate::shop::models::Product;
use serde::{Deserialize, Serialize};

/// Filters for the product listing. Both filters are optional and combine.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ProductQuery {
    /// Case-insensitive text matched against title, description and category
    #[serde(default)]
    pub search: Option<String>,

    /// Exact category name
    #[serde(default)]
    pub category: Option<String>,
}

impl ProductQuery {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            if product.category != category {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => {
                let needle = needle.to_lowercase();
                product.title.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
                    || product.category.to_lowercase().contains(&needle)
            }
            _ => true,
        }
    }

    /// Matching products, in catalog order.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect()
    }
}

/// Filtered listing together with the category names for the filter UI.
#[derive(Debug, Clone, Serialize)]
pub struct BrowseResult {
    pub products: Vec<Product>,
    pub categories: Vec<String>,
    pub total: usize,
}
