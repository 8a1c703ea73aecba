//! # Cart
//!
//! Ordered cart lines keyed by product id, and the manager that owns them.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Gesture              Operation              Cart Change                │
//! │  ───────              ─────────              ───────────                │
//! │                                                                         │
//! │  "Add to cart" ─────► add_item(id, n) ─────► new line, or qty += n      │
//! │                                              + success toast            │
//! │                                                                         │
//! │  Stepper +/- ───────► update_quantity() ───► qty = n (n <= 0 removes)   │
//! │                                                                         │
//! │  Trash icon ────────► remove_item() ───────► line deleted               │
//! │                                                                         │
//! │  After checkout ────► clear() ─────────────► no lines                   │
//! │                                                                         │
//! │  Badge / summary ───► total_item_count(), total_price() (read only)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use ts_rs::TS;

use crate::messages::{self, MessageKey};
use crate::money::Money;
use crate::ports::{Notifier, PriceLookup, Translator};
use crate::types::ProductId;
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Cart Line
// =============================================================================

/// One product's accumulated quantity in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub product_id: ProductId,

    /// Always at least 1 while the line is in a cart.
    pub quantity: i64,

    /// When the line was first created.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    fn new(product_id: ProductId, quantity: i64) -> Self {
        CartLine {
            product_id,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Line total using an externally supplied unit price.
    pub fn line_total(&self, unit_price: Money) -> Money {
        unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Limits
// =============================================================================

/// Per-session cart limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLimits {
    /// Quantities above this are held at this value.
    pub max_item_quantity: i64,
}

impl CartLimits {
    /// Limits with the given per-line cap. Caps below 1 are raised to 1.
    pub fn new(max_item_quantity: i64) -> Self {
        CartLimits {
            max_item_quantity: max_item_quantity.max(1),
        }
    }

    #[inline]
    fn clamp(&self, quantity: i64) -> i64 {
        quantity.min(self.max_item_quantity)
    }
}

impl Default for CartLimits {
    fn default() -> Self {
        CartLimits::new(MAX_ITEM_QUANTITY)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The cart contents.
///
/// ## Invariants
/// - Lines are unique by `product_id`
/// - Every line has quantity > 0; a line driven to 0 or below is removed
/// - Lines keep the order in which products were first added
#[derive(Debug, Clone, Default, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` of a product, merging into an existing line.
    /// Returns the line's resulting quantity.
    fn add(&mut self, product_id: ProductId, quantity: i64, limits: CartLimits) -> i64 {
        if let Some(line) = self.line_mut(product_id.as_str()) {
            line.quantity = limits.clamp(line.quantity.saturating_add(quantity));
            return line.quantity;
        }

        let quantity = limits.clamp(quantity);
        self.lines.push(CartLine::new(product_id, quantity));
        quantity
    }

    /// Deletes a line. Returns `false` if there was none.
    fn remove(&mut self, product_id: &str) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.product_id.as_str() != product_id);
        self.lines.len() != initial_len
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|l| l.product_id.as_str() == product_id)
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id.as_str() == product_id)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    fn clear(&mut self) {
        self.lines.clear();
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all quantities, saturating at `i64::MAX`.
    pub fn total_quantity(&self) -> i64 {
        self.lines
            .iter()
            .fold(0_i64, |total, l| total.saturating_add(l.quantity))
    }

    /// Sum of `quantity × unit price`. Lines without a known price add zero.
    pub fn total_price(&self, prices: &dyn PriceLookup) -> Money {
        self.lines
            .iter()
            .filter_map(|l| match prices.unit_price(&l.product_id) {
                Some(unit_price) => Some(l.line_total(unit_price)),
                None => {
                    trace!(product_id = %l.product_id, "no price for cart line");
                    None
                }
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Cart summary for views (badge count, footer total).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub total_price_cents: i64,
}

// =============================================================================
// Cart Manager
// =============================================================================

/// Owns the session's cart and notifies the shopper on additions.
///
/// Like the favorites manager, every operation is total: operating on an
/// absent line is a no-op, a non-positive quantity removes.
pub struct CartManager {
    cart: Cart,
    limits: CartLimits,
    notifier: Arc<dyn Notifier>,
    translator: Arc<dyn Translator>,
}

impl CartManager {
    /// Creates an empty cart with default limits.
    pub fn new(notifier: Arc<dyn Notifier>, translator: Arc<dyn Translator>) -> Self {
        Self::with_limits(notifier, translator, CartLimits::default())
    }

    pub fn with_limits(
        notifier: Arc<dyn Notifier>,
        translator: Arc<dyn Translator>,
        limits: CartLimits,
    ) -> Self {
        CartManager {
            cart: Cart::new(),
            limits,
            notifier,
            translator,
        }
    }

    /// Adds a product to the cart or increases its quantity.
    ///
    /// ## Behavior
    /// - No line yet: created with `quantity`
    /// - Line exists: quantity increased by `quantity`
    /// - Either way the result is held at the per-line cap
    /// - `quantity <= 0`: nothing is added, no notification
    ///
    /// Every successful add fires one success notification. Returns whether
    /// the add happened.
    pub fn add_item(&mut self, product_id: impl Into<ProductId>, quantity: i64) -> bool {
        let product_id = product_id.into();
        if quantity <= 0 {
            trace!(product_id = %product_id, quantity, "ignoring non-positive add");
            return false;
        }

        debug!(product_id = %product_id, quantity, "add to cart");
        let resulting = self.cart.add(product_id, quantity, self.limits);
        trace!(resulting, "line quantity after add");

        let text = messages::resolve(self.translator.as_ref(), MessageKey::CartItemAdded);
        self.notifier
            .notify(&text, MessageKey::CartItemAdded.severity());
        true
    }

    /// Adds a single unit.
    pub fn add_one(&mut self, product_id: impl Into<ProductId>) -> bool {
        self.add_item(product_id, 1)
    }

    /// Deletes a line regardless of its quantity. Absent line: no-op.
    pub fn remove_item(&mut self, product_id: impl AsRef<str>) -> bool {
        let product_id = product_id.as_ref();
        let removed = self.cart.remove(product_id);
        if removed {
            debug!(product_id = %product_id, "remove from cart");
        } else {
            trace!(product_id = %product_id, "not in cart");
        }
        removed
    }

    /// Sets a line's quantity (absolute, not an increment).
    ///
    /// ## Behavior
    /// - `quantity <= 0`: same as `remove_item`
    /// - Line absent: no-op, the line is not created
    /// - Otherwise: quantity set, held at the per-line cap
    pub fn update_quantity(&mut self, product_id: impl AsRef<str>, quantity: i64) -> bool {
        let product_id = product_id.as_ref();
        if quantity <= 0 {
            return self.remove_item(product_id);
        }

        let limits = self.limits;
        match self.cart.line_mut(product_id) {
            Some(line) => {
                line.quantity = limits.clamp(quantity);
                debug!(product_id = %product_id, quantity = line.quantity, "update cart quantity");
                true
            }
            None => {
                trace!(product_id = %product_id, "update on absent line");
                false
            }
        }
    }

    /// Empties the cart without notifying.
    pub fn clear(&mut self) {
        debug!(cleared = self.cart.line_count(), "clear cart");
        self.cart.clear();
    }

    /// Sum of quantities across all lines.
    pub fn total_item_count(&self) -> i64 {
        self.cart.total_quantity()
    }

    /// Sum of `quantity × unit price` via the given lookup.
    pub fn total_price(&self, prices: &dyn PriceLookup) -> Money {
        self.cart.total_price(prices)
    }

    pub fn totals(&self, prices: &dyn PriceLookup) -> CartTotals {
        CartTotals {
            line_count: self.cart.line_count(),
            total_quantity: self.cart.total_quantity(),
            total_price_cents: self.cart.total_price(prices).cents(),
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn line(&self, product_id: impl AsRef<str>) -> Option<&CartLine> {
        self.cart.line(product_id.as_ref())
    }

    /// Quantity of a product, 0 when it has no line.
    pub fn quantity_of(&self, product_id: impl AsRef<str>) -> i64 {
        self.line(product_id).map_or(0, |l| l.quantity)
    }

    pub fn contains(&self, product_id: impl AsRef<str>) -> bool {
        self.line(product_id).is_some()
    }

    pub fn line_count(&self) -> usize {
        self.cart.line_count()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn limits(&self) -> CartLimits {
        self.limits
    }
}

impl std::fmt::Debug for CartManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartManager")
            .field("cart", &self.cart)
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::ports::NoTranslations;
    use crate::testing::{MapTranslator, RecordingNotifier};
    use crate::types::Severity;

    fn manager() -> (CartManager, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let manager = CartManager::new(notifier.clone(), Arc::new(NoTranslations));
        (manager, notifier)
    }

    fn prices() -> HashMap<ProductId, Money> {
        HashMap::from([
            (ProductId::from("whey"), Money::from_cents(4999)),
            (ProductId::from("creatine"), Money::from_cents(1999)),
        ])
    }

    #[test]
    fn test_add_same_product_accumulates() {
        let (mut cart, _) = manager();

        cart.add_item("p1", 2);
        cart.add_item("p1", 3);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of("p1"), 5);
    }

    #[test]
    fn test_every_add_notifies() {
        let (mut cart, notifier) = manager();

        cart.add_one("p1");
        cart.add_one("p1");
        cart.add_item("p2", 4);

        assert_eq!(notifier.count(), 3);
        assert_eq!(
            notifier.last(),
            Some(("Added to cart".to_string(), Severity::Success))
        );
    }

    #[test]
    fn test_add_uses_translation() {
        let notifier = Arc::new(RecordingNotifier::new());
        let translator = Arc::new(MapTranslator::new([("cart.added", "In den Warenkorb gelegt")]));
        let mut cart = CartManager::new(notifier.clone(), translator);

        cart.add_one("p1");

        assert_eq!(notifier.last().map(|(m, _)| m), Some("In den Warenkorb gelegt".to_string()));
    }

    #[test]
    fn test_non_positive_add_is_noop() {
        let (mut cart, notifier) = manager();

        assert!(!cart.add_item("p1", 0));
        assert!(!cart.add_item("p1", -3));

        assert!(cart.is_empty());
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn test_update_to_zero_removes_line() {
        let (mut cart, _) = manager();
        cart.add_item("p1", 2);

        cart.update_quantity("p1", 0);

        assert!(!cart.contains("p1"));
        assert_eq!(cart.line_count(), 0);
    }

    #[test]
    fn test_update_negative_matches_update_zero() {
        let (mut a, _) = manager();
        let (mut b, _) = manager();
        for cart in [&mut a, &mut b] {
            cart.add_item("p1", 2);
            cart.add_item("p2", 1);
        }

        a.update_quantity("p1", 0);
        b.update_quantity("p1", -5);

        assert_eq!(a.lines().len(), b.lines().len());
        assert_eq!(a.quantity_of("p1"), b.quantity_of("p1"));
        assert_eq!(a.quantity_of("p2"), b.quantity_of("p2"));
    }

    #[test]
    fn test_update_is_absolute() {
        let (mut cart, notifier) = manager();
        cart.add_item("p1", 5);

        assert!(cart.update_quantity("p1", 2));

        assert_eq!(cart.quantity_of("p1"), 2);
        assert_eq!(notifier.count(), 1);
    }

    #[test]
    fn test_update_absent_line_does_not_create_it() {
        let (mut cart, _) = manager();

        assert!(!cart.update_quantity("ghost", 3));

        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_deletes_regardless_of_quantity() {
        let (mut cart, notifier) = manager();
        cart.add_item("p1", 7);

        assert!(cart.remove_item("p1"));
        assert!(!cart.remove_item("p1"));

        assert!(cart.is_empty());
        assert_eq!(notifier.count(), 1);
    }

    #[test]
    fn test_quantity_is_capped() {
        let notifier = Arc::new(RecordingNotifier::new());
        let mut cart =
            CartManager::with_limits(notifier.clone(), Arc::new(NoTranslations), CartLimits::new(10));

        cart.add_item("p1", 8);
        cart.add_item("p1", 8);
        assert_eq!(cart.quantity_of("p1"), 10);

        cart.update_quantity("p1", 50);
        assert_eq!(cart.quantity_of("p1"), 10);

        cart.add_item("p2", 40);
        assert_eq!(cart.quantity_of("p2"), 10);
        assert_eq!(notifier.count(), 3);
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let notifier = Arc::new(RecordingNotifier::new());
        let mut cart = CartManager::with_limits(
            notifier.clone(),
            Arc::new(NoTranslations),
            CartLimits::new(i64::MAX),
        );

        cart.add_item("a", i64::MAX);
        cart.add_item("b", 1);

        assert_eq!(cart.total_item_count(), i64::MAX);
        assert_eq!(cart.totals(&prices()).total_quantity, i64::MAX);
        assert_eq!(notifier.count(), 2);
    }

    #[test]
    fn test_limits_never_below_one() {
        assert_eq!(CartLimits::new(0).max_item_quantity, 1);
        assert_eq!(CartLimits::default().max_item_quantity, MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let (mut cart, _) = manager();
        cart.add_one("b");
        cart.add_one("a");
        cart.add_one("b");

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_totals() {
        let (mut cart, _) = manager();
        cart.add_item("whey", 2);
        cart.add_item("creatine", 1);
        cart.add_item("unpriced", 4);

        assert_eq!(cart.total_item_count(), 7);
        assert_eq!(cart.total_price(&prices()).cents(), 2 * 4999 + 1999);
        assert_eq!(
            cart.totals(&prices()),
            CartTotals {
                line_count: 3,
                total_quantity: 7,
                total_price_cents: 11997,
            }
        );
    }

    #[test]
    fn test_clear_is_silent() {
        let (mut cart, notifier) = manager();
        cart.add_item("p1", 2);

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
        assert_eq!(cart.total_price(&prices()), Money::zero());
        assert_eq!(notifier.count(), 1);
    }

    #[test]
    fn test_cart_serializes_camel_case() {
        let (mut cart, _) = manager();
        cart.add_item("whey", 2);

        let json = serde_json::to_value(cart.cart()).unwrap();
        assert_eq!(json["lines"][0]["productId"], "whey");
        assert_eq!(json["lines"][0]["quantity"], 2);
    }
}
