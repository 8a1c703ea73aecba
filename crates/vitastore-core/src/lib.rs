//! # vitastore-core: Session State for the Vitastore Storefront
//!
//! This crate owns the only stateful logic of the storefront client: the
//! favorite set and the cart. Everything is synchronous and in-memory;
//! user feedback leaves the crate only through injected ports.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Vitastore Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Mobile views (external)                      │   │
//! │  │   Product list ──► Product detail ──► Cart ──► Favorites        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ gestures                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  vitastore-session                              │   │
//! │  │   StoreSession, ToastQueue, StringTable, Catalog, config        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ vitastore-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌───────────┐ ┌───────────┐ ┌───────────┐ ┌───────────────┐   │   │
//! │  │  │ favorites │ │   cart    │ │  ports    │ │   messages    │   │   │
//! │  │  │ Favorite- │ │ Cart-     │ │ Notifier  │ │  MessageKey   │   │   │
//! │  │  │ Manager   │ │ Manager   │ │Translator │ │  + fallbacks  │   │   │
//! │  │  └───────────┘ └───────────┘ └───────────┘ └───────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO PERSISTENCE • TOTAL OPERATIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `ProductId`, `Severity`
//! - [`ports`] - `Notifier`, `Translator`, `PriceLookup`
//! - [`messages`] - user-facing message keys and English fallbacks
//! - [`favorites`] - the favorite set and its manager
//! - [`cart`] - cart lines and the cart manager
//! - [`money`] - integer money for cart totals
//! - [`validation`] - optional caller-side input checks
//! - [`error`] - error types for validation
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use vitastore_core::{FavoritesManager, NoTranslations, Notifier, Severity};
//!
//! struct Silent;
//! impl Notifier for Silent {
//!     fn notify(&self, _message: &str, _severity: Severity) {}
//! }
//!
//! let mut favorites = FavoritesManager::new(Arc::new(Silent), Arc::new(NoTranslations));
//! assert!(favorites.toggle_favorite("sku-42"));
//! assert!(favorites.is_favorite("sku-42"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod favorites;
pub mod messages;
pub mod money;
pub mod ports;
pub mod types;
pub mod validation;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLimits, CartLine, CartManager, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use favorites::{FavoriteSet, FavoritesManager};
pub use messages::MessageKey;
pub use money::Money;
pub use ports::{NoTranslations, Notifier, PriceLookup, Translator};
pub use types::{ProductId, Severity};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single product in the cart.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Sessions can lower or raise it through `CartLimits`.
pub const MAX_ITEM_QUANTITY: i64 = 999;
