//! # Product Catalog
//!
//! Read-only product list supplied to the session from outside. The cart
//! uses it only as a `PriceLookup`; views use it for names and the
//! "-20%" badge on discounted products.
//!
//! ## File Format
//! ```json
//! [
//!   { "id": "whey-900g", "name": "Whey Protein 900g",
//!     "priceCents": 3999, "compareAtPriceCents": 4999, "category": "protein" }
//! ]
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;
use vitastore_core::validation::{validate_price, validate_product_id};
use vitastore_core::{CoreError, CoreResult, Money, PriceLookup, ProductId, ValidationError};

use crate::error::{SessionError, SessionResult};

/// A product as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: ProductId,
    pub name: String,

    /// Current selling price in cents.
    pub price_cents: i64,

    /// Original price shown struck through, if the product is on sale.
    #[serde(default)]
    pub compare_at_price_cents: Option<i64>,

    #[serde(default)]
    pub category: Option<String>,
}

impl Product {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Whole-percent discount against the compare-at price, rounded half up.
    ///
    /// `None` when there is no compare-at price or it is not above the
    /// selling price.
    ///
    /// ```text
    /// compare_at 4999, price 3999 → 1000 / 4999 = 20.004% → 20
    /// compare_at 3000, price 1995 → 1005 / 3000 = 33.5%   → 34
    /// ```
    pub fn discount_percentage(&self) -> Option<u32> {
        let compare_at = self.compare_at_price_cents?;
        if compare_at <= 0 || compare_at <= self.price_cents {
            return None;
        }

        let saved = i128::from(compare_at - self.price_cents.max(0));
        let compare_at = i128::from(compare_at);
        let pct = (saved * 200 + compare_at) / (compare_at * 2);
        u32::try_from(pct).ok()
    }

    pub fn is_on_sale(&self) -> bool {
        self.discount_percentage().is_some()
    }
}

/// Products indexed by id, in file order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Builds a catalog, rejecting blank ids, negative prices and
    /// duplicate ids.
    pub fn new(products: Vec<Product>) -> SessionResult<Self> {
        let mut index = HashMap::with_capacity(products.len());

        for (i, product) in products.iter().enumerate() {
            validate_product_id(product.id.as_str())?;
            validate_price(product.price_cents)?;
            if let Some(compare_at) = product.compare_at_price_cents {
                validate_price(compare_at)?;
            }

            if index.insert(product.id.clone(), i).is_some() {
                return Err(ValidationError::Duplicate {
                    field: "product_id".to_string(),
                    value: product.id.to_string(),
                }
                .into());
            }
        }

        Ok(Catalog { products, index })
    }

    pub fn from_json_str(json: &str) -> SessionResult<Self> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    pub fn from_json_file(path: &Path) -> SessionResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SessionError::io(path, e))?;
        let catalog = Self::from_json_str(&content)?;
        info!(path = %path.display(), products = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn get(&self, id: impl AsRef<str>) -> Option<&Product> {
        self.index
            .get(id.as_ref())
            .and_then(|&i| self.products.get(i))
    }

    /// Like `get`, for callers that treat a missing product as an error
    /// (e.g. opening a product detail screen from a stale link).
    pub fn require(&self, id: impl AsRef<str>) -> CoreResult<&Product> {
        let id = id.as_ref();
        self.get(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products in a category, in catalog order.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> + 'a {
        self.products
            .iter()
            .filter(move |p| p.category.as_deref() == Some(category))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl PriceLookup for Catalog {
    fn unit_price(&self, product_id: &ProductId) -> Option<Money> {
        self.get(product_id).map(Product::price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        { "id": "whey-900g", "name": "Whey Protein 900g", "priceCents": 3999,
          "compareAtPriceCents": 4999, "category": "protein" },
        { "id": "creatine-300g", "name": "Creatine Monohydrate 300g", "priceCents": 1995,
          "compareAtPriceCents": 3000, "category": "performance" },
        { "id": "omega-3", "name": "Omega-3 120 caps", "priceCents": 1499 }
    ]"#;

    fn product(id: &str, price: i64, compare_at: Option<i64>) -> Product {
        Product {
            id: id.into(),
            name: id.to_string(),
            price_cents: price,
            compare_at_price_cents: compare_at,
            category: None,
        }
    }

    #[test]
    fn test_load_and_lookup() {
        let catalog = Catalog::from_json_str(CATALOG).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("omega-3").map(|p| p.price_cents), Some(1499));
        assert_eq!(catalog.unit_price(&"whey-900g".into()), Some(Money::from_cents(3999)));
        assert_eq!(catalog.unit_price(&"nope".into()), None);
    }

    #[test]
    fn test_require_missing_product() {
        let catalog = Catalog::from_json_str(CATALOG).unwrap();
        let err = catalog.require("nope").unwrap_err();
        assert_eq!(err.to_string(), "Product not found: nope");
    }

    #[test]
    fn test_in_category() {
        let catalog = Catalog::from_json_str(CATALOG).unwrap();
        let protein: Vec<_> = catalog.in_category("protein").map(|p| p.id.as_str()).collect();
        assert_eq!(protein, vec!["whey-900g"]);
    }

    #[test]
    fn test_discount_percentage() {
        assert_eq!(product("a", 3999, Some(4999)).discount_percentage(), Some(20));
        assert_eq!(product("b", 1995, Some(3000)).discount_percentage(), Some(34));
        assert_eq!(product("c", 0, Some(1000)).discount_percentage(), Some(100));
        assert_eq!(product("d", 1000, Some(1000)).discount_percentage(), None);
        assert_eq!(product("e", 1200, Some(1000)).discount_percentage(), None);
        assert_eq!(product("f", 1000, None).discount_percentage(), None);
        assert!(!product("g", 1000, None).is_on_sale());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = Catalog::new(vec![product("a", 100, None), product("a", 200, None)]).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Validation(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_invalid_entries_rejected() {
        assert!(Catalog::new(vec![product(" ", 100, None)]).is_err());
        assert!(Catalog::new(vec![product("a", -1, None)]).is_err());
        assert!(Catalog::new(vec![product("a", 100, Some(-5))]).is_err());
    }
}
