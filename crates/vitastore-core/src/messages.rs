//! # User-Facing Messages
//!
//! Every toast the core emits, with its translation key and the English
//! text shown when the translator has nothing for it.
//!
//! ## Resolution
//! ```text
//! MessageKey::FavoriteAdded
//!      │
//!      ▼
//! translator.translate("favorites.added")
//!      │
//!      ├── Some("Zu Favoriten hinzugefügt") ──► shown as-is
//!      │
//!      └── None / "" / "   " ──────────────────► "Added to favorites"
//! ```
//!
//! The view layer must never show a blank toast, so a blank translation is
//! treated the same as a missing one.

use tracing::{debug, warn};

use crate::ports::Translator;
use crate::types::Severity;

/// A message the managers can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    FavoriteAdded,
    FavoriteRemoved,
    CartItemAdded,
}

impl MessageKey {
    /// Translation key looked up through the `Translator` port.
    pub const fn key(&self) -> &'static str {
        match self {
            MessageKey::FavoriteAdded => "favorites.added",
            MessageKey::FavoriteRemoved => "favorites.removed",
            MessageKey::CartItemAdded => "cart.added",
        }
    }

    /// English text used when no translation is available.
    pub const fn fallback(&self) -> &'static str {
        match self {
            MessageKey::FavoriteAdded => "Added to favorites",
            MessageKey::FavoriteRemoved => "Removed from favorites",
            MessageKey::CartItemAdded => "Added to cart",
        }
    }

    /// Severity the message is shown with.
    pub const fn severity(&self) -> Severity {
        match self {
            MessageKey::FavoriteAdded | MessageKey::CartItemAdded => Severity::Success,
            MessageKey::FavoriteRemoved => Severity::Info,
        }
    }

    pub const ALL: [MessageKey; 3] = [
        MessageKey::FavoriteAdded,
        MessageKey::FavoriteRemoved,
        MessageKey::CartItemAdded,
    ];
}

/// Resolves a message through the translator, falling back to English.
pub fn resolve(translator: &dyn Translator, message: MessageKey) -> String {
    match translator.translate(message.key()) {
        Some(text) if !text.trim().is_empty() => text,
        Some(_) => {
            warn!(key = message.key(), "blank translation, using fallback");
            message.fallback().to_string()
        }
        None => {
            debug!(key = message.key(), "no translation, using fallback");
            message.fallback().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::NoTranslations;
    use crate::testing::MapTranslator;

    #[test]
    fn test_missing_translation_uses_fallback() {
        assert_eq!(resolve(&NoTranslations, MessageKey::FavoriteAdded), "Added to favorites");
        assert_eq!(
            resolve(&NoTranslations, MessageKey::FavoriteRemoved),
            "Removed from favorites"
        );
        assert_eq!(resolve(&NoTranslations, MessageKey::CartItemAdded), "Added to cart");
    }

    #[test]
    fn test_translation_is_used_when_present() {
        let translator = MapTranslator::new([("favorites.added", "Zu Favoriten hinzugefügt")]);
        assert_eq!(
            resolve(&translator, MessageKey::FavoriteAdded),
            "Zu Favoriten hinzugefügt"
        );
    }

    #[test]
    fn test_blank_translation_uses_fallback() {
        let translator = MapTranslator::new([("favorites.removed", "  "), ("cart.added", "")]);
        assert_eq!(
            resolve(&translator, MessageKey::FavoriteRemoved),
            "Removed from favorites"
        );
        assert_eq!(resolve(&translator, MessageKey::CartItemAdded), "Added to cart");
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<_> = MessageKey::ALL.iter().map(|m| m.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), MessageKey::ALL.len());
    }
}
