//! Shop Domain Models
//!
//! Catalog products and the two collections kept for the shopper: the cart
//! (products with a quantity) and the wishlist (products stored verbatim).

use serde::{Deserialize, Serialize};

// =============================================================================
// Constants
// =============================================================================

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "shop_cart_items";
/// Storage key holding the serialized wishlist.
pub const WISHLIST_STORAGE_KEY: &str = "shop_wishlist_items";

/// Catalog product identifier.
pub type ProductId = u64;

/// Cart line quantity. Signed because the add path accumulates whatever
/// increment it is given; only the explicit quantity update clamps.
pub type Quantity = i64;

// =============================================================================
// Catalog Models
// =============================================================================

/// Aggregate review score for a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    /// Average score
    pub rate: f64,

    /// Number of reviews
    pub count: u64,
}

/// A product as served by the catalog. Never created or edited locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    /// Image URI
    pub image: String,
    pub rating: Rating,
}

// =============================================================================
// Cart Models
// =============================================================================

/// A product in the cart together with how many of it the shopper wants.
///
/// Serializes as the product's own fields plus `quantity`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,

    pub quantity: Quantity,
}

impl CartLine {
    pub fn new(product: Product, quantity: Quantity) -> Self {
        Self { product, quantity }
    }

    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> f64 {
        self.product.price * self.quantity as f64
    }
}

/// Cart lines in insertion order, unique by product id.
pub type Cart = Vec<CartLine>;

/// Wishlist entries in insertion order, unique by product id.
pub type Wishlist = Vec<Product>;

/// Snapshot of a cart taken at checkout.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub items: Cart,
    pub total: f64,
    pub count: Quantity,
    /// One-line summary, e.g. `"2x Backpack, 1x Jacket"`
    pub summary: String,
}


#[cfg(test)]
mod tests {
    use super::fixtures::product;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cart_line_serializes_flat() {
        let line = CartLine::new(product(3, 9.5), 2);
        let value = serde_json::to_value(&line).unwrap();

        assert_eq!(value["id"], 3);
        assert_eq!(value["price"], 9.5);
        assert_eq!(value["rating"]["count"], 120);
        assert_eq!(value["quantity"], 2);
        assert!(value.get("product").is_none());
    }

    #[test]
    fn test_cart_line_parses_catalog_shape() {
        let raw = json!({
            "id": 1,
            "title": "Backpack",
            "price": 109.95,
            "description": "Fits 15 inch laptops",
            "category": "men's clothing",
            "image": "https://img.example/1.jpg",
            "rating": { "rate": 3.9, "count": 120 },
            "quantity": 4
        });

        let line: CartLine = serde_json::from_value(raw).unwrap();
        assert_eq!(line.id(), 1);
        assert_eq!(line.quantity, 4);
        assert!((line.line_total() - 439.8).abs() < 1e-9);
    }

    #[test]
    fn test_integer_price_is_accepted() {
        let raw = json!({
            "id": 2,
            "title": "Ring",
            "price": 10,
            "description": "",
            "category": "jewelery",
            "image": "",
            "rating": { "rate": 5, "count": 1 }
        });

        let p: Product = serde_json::from_value(raw).unwrap();
        assert_eq!(p.price, 10.0);
        assert_eq!(p.rating.rate, 5.0);
    }
}
