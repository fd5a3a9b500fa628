//! Products and the immutable catalog.
//!
//! Products are defined once at startup and priced in USD. Nothing here is
//! persisted; the catalog lives for the duration of the process.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A purchasable catalog item with a fixed USD price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable identifier used to reference the product in purchase calls.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Price in USD.
    pub price_usd: Decimal,
    /// Image reference (URL or asset path).
    pub image_url: String,
}

/// An immutable set of products with lookup by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Creates a catalog from a list of products.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Looks up a product by id.
    #[must_use]
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Returns all products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Returns the number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns `true` if the catalog holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn membership() -> Product {
        Product {
            id: "premium-membership".into(),
            name: "Premium Membership".into(),
            description: "Access to exclusive content and features".into(),
            price_usd: Decimal::new(9999, 2),
            image_url: "https://example.com/premium.png".into(),
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::new(vec![membership()]);
        assert!(catalog.product("premium-membership").is_some());
        assert!(catalog.product("missing").is_none());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_product_roundtrip() {
        let product = membership();
        let json = serde_json::to_string(&product).unwrap();
        assert!(json.contains("\"priceUsd\":\"99.99\""));
        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back, product);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert!(catalog.product("anything").is_none());
    }
}
