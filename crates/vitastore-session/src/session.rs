//! # Store Session
//!
//! One shopper session: a favorites state, a cart state and the ports they
//! share. Built once at the root of the view tree and passed down; there is
//! no global instance.
//!
//! ## Thread Safety
//! The managers are plain `&mut self` types. Each is wrapped in
//! `Arc<Mutex<T>>` here so that a host dispatching gestures from more than
//! one thread still applies writes one at a time, through the manager's
//! own operations.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State Architecture                           │
//! │                                                                         │
//! │  StoreSession (id: UUID v4)                                             │
//! │  ├── config: SessionConfig                                              │
//! │  ├── favorites: FavoritesState ── Arc<Mutex<FavoritesManager>> ──┐     │
//! │  ├── cart:      CartState ─────── Arc<Mutex<CartManager>> ───────┤     │
//! │  └── toasts:    Option<Arc<ToastQueue>>                          │     │
//! │                                                                  ▼     │
//! │                                     shared Arc<dyn Notifier>            │
//! │                                     shared Arc<dyn Translator>          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{info, info_span, warn};
use uuid::Uuid;
use vitastore_core::{CartManager, FavoritesManager, Notifier, Translator};

use crate::catalog::Catalog;
use crate::config::SessionConfig;
use crate::error::SessionResult;
use crate::strings::StringTable;
use crate::toast::ToastQueue;

fn lock_recovering<'a, T>(mutex: &'a Mutex<T>, what: &str) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        warn!(state = what, "mutex poisoned, recovering");
        PoisonError::into_inner(poisoned)
    })
}

// =============================================================================
// Favorites State
// =============================================================================

/// Shared handle to the session's favorites.
#[derive(Debug, Clone)]
pub struct FavoritesState {
    inner: Arc<Mutex<FavoritesManager>>,
}

impl FavoritesState {
    pub fn new(manager: FavoritesManager) -> Self {
        FavoritesState {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    /// Runs `f` with read access.
    ///
    /// ```rust,ignore
    /// let hearted = session.favorites().with(|f| f.is_favorite("whey-900g"));
    /// ```
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&FavoritesManager) -> R,
    {
        let manager = lock_recovering(&self.inner, "favorites");
        f(&manager)
    }

    /// Runs `f` with write access.
    pub fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut FavoritesManager) -> R,
    {
        let mut manager = lock_recovering(&self.inner, "favorites");
        f(&mut manager)
    }
}

// =============================================================================
// Cart State
// =============================================================================

/// Shared handle to the session's cart.
#[derive(Debug, Clone)]
pub struct CartState {
    inner: Arc<Mutex<CartManager>>,
}

impl CartState {
    pub fn new(manager: CartManager) -> Self {
        CartState {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    /// Runs `f` with read access.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartManager) -> R,
    {
        let manager = lock_recovering(&self.inner, "cart");
        f(&manager)
    }

    /// Runs `f` with write access.
    ///
    /// ```rust,ignore
    /// session.cart().with_mut(|c| c.add_item("whey-900g", 2));
    /// ```
    pub fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartManager) -> R,
    {
        let mut manager = lock_recovering(&self.inner, "cart");
        f(&mut manager)
    }
}

// =============================================================================
// Store Session
// =============================================================================

/// Everything one shopper session owns.
#[derive(Debug, Clone)]
pub struct StoreSession {
    id: Uuid,
    config: SessionConfig,
    favorites: FavoritesState,
    cart: CartState,
    catalog: Arc<Catalog>,
    toasts: Option<Arc<ToastQueue>>,
}

impl StoreSession {
    /// Builds a session around caller-supplied ports.
    pub fn new(
        config: SessionConfig,
        notifier: Arc<dyn Notifier>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        let id = Uuid::new_v4();
        let span = info_span!("session", session_id = %id);
        let _guard = span.enter();

        let favorites = FavoritesManager::new(notifier.clone(), translator.clone());
        let cart = CartManager::with_limits(notifier, translator, config.cart_limits());

        info!(locale = %config.locale, "session started");

        StoreSession {
            id,
            config,
            favorites: FavoritesState::new(favorites),
            cart: CartState::new(cart),
            catalog: Arc::new(Catalog::default()),
            toasts: None,
        }
    }

    /// Builds a session with the default adapters: a `ToastQueue` for
    /// notifications, the string table from `strings_path` (or none), and
    /// the catalog from `catalog_path` (or an empty one).
    pub fn bootstrap(config: SessionConfig) -> SessionResult<Self> {
        config.validate()?;

        let strings = match &config.strings_path {
            Some(path) => StringTable::from_json_file(path, &config.locale)?,
            None => StringTable::empty(config.locale.clone()),
        };
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_json_file(path)?,
            None => Catalog::default(),
        };
        let toasts = Arc::new(ToastQueue::new());

        let mut session = Self::new(config, toasts.clone(), Arc::new(strings));
        session.catalog = Arc::new(catalog);
        session.toasts = Some(toasts);
        Ok(session)
    }

    /// Replaces the catalog used for cart totals.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn favorites(&self) -> &FavoritesState {
        &self.favorites
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The toast queue, when the session was bootstrapped with one.
    pub fn toasts(&self) -> Option<&ToastQueue> {
        self.toasts.as_deref()
    }

    /// Cart total priced against the session catalog, formatted for display.
    pub fn formatted_cart_total(&self) -> String {
        let total = self.cart.with(|c| c.total_price(&*self.catalog));
        self.config.format_currency(total.cents())
    }

    /// Drops favorites and cart contents. Used on sign-out.
    pub fn reset(&self) {
        let _span = info_span!("session", session_id = %self.id).entered();
        self.favorites.with_mut(FavoritesManager::clear_favorites);
        self.cart.with_mut(CartManager::clear);
        info!("session reset");
    }
}
