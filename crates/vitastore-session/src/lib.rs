//! # vitastore-session
//!
//! Session scope for the Vitastore storefront: wires the pure state core to
//! concrete adapters and hands the view layer one `StoreSession`.
//!
//! ## Module Organization
//! ```text
//! vitastore_session/
//! ├── lib.rs        ◄─── You are here (tracing setup, re-exports)
//! ├── session.rs    ◄─── StoreSession, FavoritesState, CartState
//! ├── config.rs     ◄─── SessionConfig (TOML + VITASTORE_* env)
//! ├── strings.rs    ◄─── StringTable (Translator adapter)
//! ├── toast.rs      ◄─── ToastQueue, TracingNotifier (Notifier adapters)
//! ├── catalog.rs    ◄─── Catalog, Product (PriceLookup adapter)
//! └── error.rs      ◄─── SessionError
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing()            RUST_LOG or "info,vitastore=debug"        │
//! │  2. SessionConfig::load()     file → env overrides → validate           │
//! │  3. StoreSession::bootstrap() strings + catalog + toast queue           │
//! │  4. pass the session down the view tree                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ```rust,no_run
//! use vitastore_session::{init_tracing, SessionConfig, StoreSession};
//!
//! init_tracing();
//! let config = SessionConfig::load(None)?;
//! let session = StoreSession::bootstrap(config)?;
//! session.favorites().with_mut(|f| f.toggle_favorite("whey-900g"));
//! # Ok::<(), vitastore_session::SessionError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod session;
pub mod strings;
pub mod toast;

use tracing_subscriber::EnvFilter;

pub use catalog::{Catalog, Product};
pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use session::{CartState, FavoritesState, StoreSession};
pub use strings::StringTable;
pub use toast::{Toast, ToastQueue, TracingNotifier};

/// Installs the global tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every manager mutation
/// - `RUST_LOG=vitastore_core=trace` - Also show no-op branches
/// - Default: INFO, DEBUG for vitastore crates
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vitastore_core=debug,vitastore_session=debug"));

    // Err only means a subscriber is already installed.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
