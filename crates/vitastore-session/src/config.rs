//! # Session Configuration
//!
//! Settings a session is built from.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     VITASTORE_LOCALE=de-DE                                             │
//! │     VITASTORE_MAX_ITEM_QUANTITY=20                                     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     explicit path, or the platform config dir:                         │
//! │     ~/.config/vitastore/session.toml (Linux)                           │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     locale "en", "$", 2 decimals, cap 999                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # session.toml
//! locale = "de-DE"
//! currency_symbol = "€"
//! currency_decimals = 2
//! max_item_quantity = 20
//! strings_path = "assets/strings.json"
//! catalog_path = "assets/catalog.json"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use vitastore_core::validation::validate_quantity_limit;
use vitastore_core::{CartLimits, MAX_ITEM_QUANTITY};

use crate::error::{SessionError, SessionResult};

/// Name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "session.toml";

const ENV_LOCALE: &str = "VITASTORE_LOCALE";
const ENV_CURRENCY_SYMBOL: &str = "VITASTORE_CURRENCY_SYMBOL";
const ENV_MAX_ITEM_QUANTITY: &str = "VITASTORE_MAX_ITEM_QUANTITY";
const ENV_STRINGS_PATH: &str = "VITASTORE_STRINGS_PATH";
const ENV_CATALOG_PATH: &str = "VITASTORE_CATALOG_PATH";

/// Most decimal places a currency may be shown with.
pub const MAX_CURRENCY_DECIMALS: u8 = 4;

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// BCP 47-ish locale tag used to pick a string table ("en", "de-DE").
    pub locale: String,

    /// Currency symbol for display.
    pub currency_symbol: String,

    /// Number of decimal places for currency.
    pub currency_decimals: u8,

    /// Per-line quantity cap for the cart.
    pub max_item_quantity: i64,

    /// JSON string table file. None: every message uses its English fallback.
    pub strings_path: Option<PathBuf>,

    /// JSON product catalog file.
    pub catalog_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            locale: "en".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            max_item_quantity: MAX_ITEM_QUANTITY,
            strings_path: None,
            catalog_path: None,
        }
    }
}

impl SessionConfig {
    /// Loads configuration: file (explicit or platform default), then
    /// environment overrides, then validation.
    pub fn load(path: Option<&Path>) -> SessionResult<Self> {
        let mut config = match path.map(Path::to_path_buf).or_else(default_config_path) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                debug!(path = %path.display(), "no config file, using defaults");
                SessionConfig::default()
            }
            None => SessionConfig::default(),
        };

        config.apply_env();
        config.validate()?;

        info!(locale = %config.locale, max_item_quantity = config.max_item_quantity, "session config loaded");
        Ok(config)
    }

    /// Parses a TOML config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> SessionResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SessionError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> SessionResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Applies `VITASTORE_*` environment overrides.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary key lookup.
    ///
    /// Unparseable numeric values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(locale) = lookup(ENV_LOCALE) {
            self.locale = locale;
        }

        if let Some(symbol) = lookup(ENV_CURRENCY_SYMBOL) {
            self.currency_symbol = symbol;
        }

        if let Some(raw) = lookup(ENV_MAX_ITEM_QUANTITY) {
            match raw.trim().parse::<i64>() {
                Ok(max) => self.max_item_quantity = max,
                Err(_) => warn!(value = %raw, "ignoring invalid {}", ENV_MAX_ITEM_QUANTITY),
            }
        }

        if let Some(path) = lookup(ENV_STRINGS_PATH) {
            self.strings_path = Some(PathBuf::from(path));
        }

        if let Some(path) = lookup(ENV_CATALOG_PATH) {
            self.catalog_path = Some(PathBuf::from(path));
        }
    }

    /// Rejects an empty locale, more than `MAX_CURRENCY_DECIMALS` decimals
    /// and a cap outside `1..=MAX_QUANTITY_LIMIT`.
    pub fn validate(&self) -> SessionResult<()> {
        if self.locale.trim().is_empty() {
            return Err(SessionError::InvalidConfig("locale must not be empty".to_string()));
        }

        if self.currency_decimals > MAX_CURRENCY_DECIMALS {
            return Err(SessionError::InvalidConfig(format!(
                "currency_decimals must be at most {MAX_CURRENCY_DECIMALS}, got {}",
                self.currency_decimals
            )));
        }

        validate_quantity_limit(self.max_item_quantity)?;
        Ok(())
    }

    /// Cart limits derived from this config.
    pub fn cart_limits(&self) -> CartLimits {
        CartLimits::new(self.max_item_quantity)
    }

    /// Formats an amount in minor units as a currency string.
    ///
    /// ```rust
    /// use vitastore_session::SessionConfig;
    ///
    /// let config = SessionConfig::default();
    /// assert_eq!(config.format_currency(2499), "$24.99");
    /// ```
    pub fn format_currency(&self, minor_units: i64) -> String {
        let sign = if minor_units < 0 { "-" } else { "" };
        let magnitude = minor_units.unsigned_abs();
        let decimals = self.currency_decimals;

        if decimals == 0 {
            return format!("{sign}{}{magnitude}", self.currency_symbol);
        }

        // A scale past u64 means every amount is below one major unit.
        let (major, minor) = match 10_u64.checked_pow(u32::from(decimals)) {
            Some(scale) => (magnitude / scale, magnitude % scale),
            None => (0, magnitude),
        };
        format!(
            "{sign}{}{major}.{minor:0width$}",
            self.currency_symbol,
            width = usize::from(decimals)
        )
    }
}

/// Platform config file location, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "vitastore", "vitastore")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
