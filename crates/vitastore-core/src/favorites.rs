//! # Favorites
//!
//! The set of products the shopper has hearted during this session.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Favorite Set Operations                              │
//! │                                                                         │
//! │  Gesture               Operation              Effect      Notification  │
//! │  ───────               ─────────              ──────      ────────────  │
//! │                                                                         │
//! │  Tap heart (off) ────► toggle_favorite() ──► insert      success "added"│
//! │  Tap heart (on)  ────► toggle_favorite() ──► remove      info "removed" │
//! │  "Save" on detail ───► add_favorite()    ──► insert      success "added"│
//! │                        (already member)  ──► nothing     none           │
//! │  Swipe to delete ────► remove_favorite() ──► remove      info "removed" │
//! │                        (not a member)    ──► nothing     none           │
//! │  Sign out ───────────► clear_favorites() ──► empty       none           │
//! │                                                                         │
//! │  Heart icon render ──► is_favorite()     ──► (read only)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::messages::{self, MessageKey};
use crate::ports::{Notifier, Translator};
use crate::types::ProductId;

// =============================================================================
// Favorite Set
// =============================================================================

/// Unique product ids, iterated in the order they were first added.
///
/// ## Invariants
/// - `order` and `index` always hold exactly the same ids
/// - no id appears twice in `order`
#[derive(Debug, Clone, Default)]
pub struct FavoriteSet {
    order: Vec<ProductId>,
    index: HashSet<ProductId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an id. Returns `false` if it was already a member.
    pub fn insert(&mut self, id: ProductId) -> bool {
        if self.index.contains(&id) {
            return false;
        }
        self.index.insert(id.clone());
        self.order.push(id);
        true
    }

    /// Removes an id. Returns `false` if it was not a member.
    pub fn remove(&mut self, id: &str) -> bool {
        if !self.index.remove(id) {
            return false;
        }
        self.order.retain(|member| member.as_str() != id);
        true
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.index.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ProductId> {
        self.order.iter()
    }

    pub fn as_slice(&self) -> &[ProductId] {
        &self.order
    }
}

// =============================================================================
// Favorites Manager
// =============================================================================

/// Owns the session's favorite set and tells the shopper when it changes.
///
/// Every operation is total: adding a member or removing a non-member is a
/// silent no-op, never an error.
pub struct FavoritesManager {
    set: FavoriteSet,
    notifier: Arc<dyn Notifier>,
    translator: Arc<dyn Translator>,
}

impl FavoritesManager {
    /// Creates an empty manager wired to the given ports.
    pub fn new(notifier: Arc<dyn Notifier>, translator: Arc<dyn Translator>) -> Self {
        FavoritesManager {
            set: FavoriteSet::new(),
            notifier,
            translator,
        }
    }

    /// Adds a product to favorites.
    ///
    /// ## Behavior
    /// - Already a member: nothing happens, no notification
    /// - Otherwise: inserted, one success notification
    ///
    /// Returns whether the set changed.
    pub fn add_favorite(&mut self, product_id: impl Into<ProductId>) -> bool {
        let product_id = product_id.into();
        if self.set.contains(product_id.as_str()) {
            trace!(product_id = %product_id, "already a favorite");
            return false;
        }

        debug!(product_id = %product_id, "add favorite");
        self.set.insert(product_id);
        self.emit(MessageKey::FavoriteAdded);
        true
    }

    /// Removes a product from favorites.
    ///
    /// ## Behavior
    /// - Member: removed, one info notification
    /// - Not a member: nothing happens, no notification
    ///
    /// Returns whether the set changed.
    pub fn remove_favorite(&mut self, product_id: impl AsRef<str>) -> bool {
        let product_id = product_id.as_ref();
        if !self.set.remove(product_id) {
            trace!(product_id = %product_id, "not a favorite");
            return false;
        }

        debug!(product_id = %product_id, "remove favorite");
        self.emit(MessageKey::FavoriteRemoved);
        true
    }

    /// Flips membership of a product. Exactly one notification fires.
    ///
    /// Returns the membership after the call.
    pub fn toggle_favorite(&mut self, product_id: impl Into<ProductId>) -> bool {
        let product_id = product_id.into();
        if self.set.contains(product_id.as_str()) {
            self.remove_favorite(&product_id);
            false
        } else {
            self.add_favorite(product_id);
            true
        }
    }

    /// Pure membership query.
    #[inline]
    pub fn is_favorite(&self, product_id: impl AsRef<str>) -> bool {
        self.set.contains(product_id.as_ref())
    }

    /// Empties the set without notifying.
    pub fn clear_favorites(&mut self) {
        debug!(cleared = self.set.len(), "clear favorites");
        self.set.clear();
    }

    /// Favorited ids in the order they were added.
    pub fn favorites(&self) -> &[ProductId] {
        self.set.as_slice()
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    fn emit(&self, message: MessageKey) {
        let text = messages::resolve(self.translator.as_ref(), message);
        self.notifier.notify(&text, message.severity());
    }
}

impl std::fmt::Debug for FavoritesManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesManager")
            .field("set", &self.set)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::NoTranslations;
    use crate::testing::{MapTranslator, RecordingNotifier};
    use crate::types::Severity;

    fn manager() -> (FavoritesManager, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let manager = FavoritesManager::new(notifier.clone(), Arc::new(NoTranslations));
        (manager, notifier)
    }

    #[test]
    fn test_set_keeps_insertion_order() {
        let mut set = FavoriteSet::new();
        set.insert("c".into());
        set.insert("a".into());
        set.insert("b".into());
        set.insert("a".into());

        let ids: Vec<&str> = set.iter().map(ProductId::as_str).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);

        set.remove("a");
        let ids: Vec<&str> = set.iter().map(ProductId::as_str).collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[test]
    fn test_add_twice_keeps_one_entry_and_notifies_once() {
        let (mut favorites, notifier) = manager();

        assert!(favorites.add_favorite("p1"));
        assert!(!favorites.add_favorite("p1"));

        assert_eq!(favorites.favorites(), &[ProductId::from("p1")]);
        assert_eq!(notifier.count(), 1);
        assert_eq!(
            notifier.last(),
            Some(("Added to favorites".to_string(), Severity::Success))
        );
    }

    #[test]
    fn test_remove_missing_on_empty_set_is_silent() {
        let (mut favorites, notifier) = manager();

        assert!(!favorites.remove_favorite("missing"));

        assert!(favorites.is_empty());
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn test_remove_member_notifies_info() {
        let (mut favorites, notifier) = manager();
        favorites.add_favorite("p1");

        assert!(favorites.remove_favorite("p1"));

        assert!(!favorites.is_favorite("p1"));
        assert_eq!(
            notifier.last(),
            Some(("Removed from favorites".to_string(), Severity::Info))
        );
    }

    #[test]
    fn test_double_toggle_restores_state_with_two_opposite_notifications() {
        let (mut favorites, notifier) = manager();

        favorites.toggle_favorite("x");
        favorites.toggle_favorite("x");

        assert!(!favorites.is_favorite("x"));
        assert_eq!(
            notifier.calls(),
            vec![
                ("Added to favorites".to_string(), Severity::Success),
                ("Removed from favorites".to_string(), Severity::Info),
            ]
        );
    }

    #[test]
    fn test_toggle_scenario() {
        let (mut favorites, notifier) = manager();

        assert!(favorites.toggle_favorite("sku-42"));
        assert!(favorites.is_favorite("sku-42"));
        assert_eq!(notifier.count(), 1);
        assert_eq!(notifier.last().map(|(_, s)| s), Some(Severity::Success));

        assert!(!favorites.toggle_favorite("sku-42"));
        assert!(!favorites.is_favorite("sku-42"));
        assert_eq!(notifier.count(), 2);
        assert_eq!(
            notifier.last(),
            Some(("Removed from favorites".to_string(), Severity::Info))
        );
    }

    #[test]
    fn test_toggle_leaves_other_members_alone() {
        let (mut favorites, _) = manager();
        favorites.add_favorite("a");
        favorites.add_favorite("b");

        favorites.toggle_favorite("a");

        assert_eq!(favorites.favorites(), &[ProductId::from("b")]);
    }

    #[test]
    fn test_translated_messages() {
        let notifier = Arc::new(RecordingNotifier::new());
        let translator = Arc::new(MapTranslator::new([
            ("favorites.added", "Ajouté aux favoris"),
            ("favorites.removed", "Retiré des favoris"),
        ]));
        let mut favorites = FavoritesManager::new(notifier.clone(), translator);

        favorites.toggle_favorite("p1");
        favorites.toggle_favorite("p1");

        assert_eq!(
            notifier.calls(),
            vec![
                ("Ajouté aux favoris".to_string(), Severity::Success),
                ("Retiré des favoris".to_string(), Severity::Info),
            ]
        );
    }

    #[test]
    fn test_clear_is_silent() {
        let (mut favorites, notifier) = manager();
        favorites.add_favorite("a");
        favorites.add_favorite("b");

        favorites.clear_favorites();
        favorites.clear_favorites();

        assert!(favorites.is_empty());
        assert_eq!(notifier.count(), 2);
    }

    #[test]
    fn test_empty_id_is_accepted() {
        let (mut favorites, _) = manager();
        assert!(favorites.add_favorite(""));
        assert!(favorites.is_favorite(""));
    }
}
