//! # Ports
//!
//! Traits the managers call out through. The core never implements a UI,
//! a string table, or a catalog; `vitastore-session` (or a test) does.
//!
//! ```text
//! ┌──────────────────┐  notify(msg, severity)   ┌──────────────────────┐
//! │ FavoritesManager │ ───────────────────────► │ Notifier (toasts)    │
//! │ CartManager      │  translate(key)          ├──────────────────────┤
//! │                  │ ───────────────────────► │ Translator (strings) │
//! │                  │  unit_price(id)          ├──────────────────────┤
//! │                  │ ───────────────────────► │ PriceLookup (catalog)│
//! └──────────────────┘                          └──────────────────────┘
//! ```

use std::collections::HashMap;

use crate::money::Money;
use crate::types::{ProductId, Severity};

/// Displays ephemeral feedback to the user.
///
/// Fire-and-forget: implementations must not block and have no way to
/// report delivery failure back to the caller.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Maps a message key to a localized string.
///
/// `None` means the key has no translation; callers substitute a fallback.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> Option<String>;
}

/// Translator that knows no keys; every message falls back to English.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTranslations;

impl Translator for NoTranslations {
    fn translate(&self, _key: &str) -> Option<String> {
        None
    }
}

/// Resolves the unit price of a product for cart totals.
///
/// The cart has no pricing knowledge of its own.
pub trait PriceLookup {
    fn unit_price(&self, product_id: &ProductId) -> Option<Money>;
}

impl PriceLookup for HashMap<ProductId, Money> {
    fn unit_price(&self, product_id: &ProductId) -> Option<Money> {
        self.get(product_id).copied()
    }
}

impl<F> PriceLookup for F
where
    F: Fn(&ProductId) -> Option<Money>,
{
    fn unit_price(&self, product_id: &ProductId) -> Option<Money> {
        self(product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_translations_is_always_absent() {
        assert_eq!(NoTranslations.translate("favorites.added"), None);
        assert_eq!(NoTranslations.translate(""), None);
    }

    #[test]
    fn test_map_price_lookup() {
        let mut prices = HashMap::new();
        prices.insert(ProductId::from("whey"), Money::from_cents(4999));

        assert_eq!(prices.unit_price(&"whey".into()), Some(Money::from_cents(4999)));
        assert_eq!(prices.unit_price(&"bcaa".into()), None);
    }

    #[test]
    fn test_closure_price_lookup() {
        let flat = |_: &ProductId| Some(Money::from_cents(100));
        assert_eq!(flat.unit_price(&"anything".into()), Some(Money::from_cents(100)));
    }
}
