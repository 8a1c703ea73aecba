//! # String Tables
//!
//! `Translator` backed by a JSON file of per-locale key/value tables.
//!
//! ## File Format
//! ```json
//! {
//!   "en":    { "favorites.added": "Added to favorites" },
//!   "de":    { "favorites.added": "Zu Favoriten hinzugefügt" },
//!   "de-AT": { "cart.added": "In den Einkaufswagen gelegt" }
//! }
//! ```
//!
//! ## Locale Resolution
//! ```text
//! requested "de-AT"
//!      │
//!      ├── key in "de-AT" table? ──► use it
//!      ├── key in "de" table?    ──► use it
//!      └── neither               ──► None (core substitutes the fallback)
//! ```
//! Resolution happens once, when the table is built; each lookup is one
//! hash map read.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};
use vitastore_core::Translator;

use crate::error::{SessionError, SessionResult};

/// Per-locale raw tables as they appear in the file.
pub type LocaleTables = HashMap<String, HashMap<String, String>>;

/// Flattened strings for one locale.
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    locale: String,
    entries: HashMap<String, String>,
}

impl StringTable {
    /// A table with no entries; every lookup is absent.
    pub fn empty(locale: impl Into<String>) -> Self {
        StringTable {
            locale: locale.into(),
            entries: HashMap::new(),
        }
    }

    /// Builds the table for `locale` from raw per-locale tables.
    ///
    /// A locale with no matching table (exact or base language) yields an
    /// empty table, not an error.
    pub fn from_tables(mut tables: LocaleTables, locale: &str) -> Self {
        let mut entries = HashMap::new();

        if let Some(base) = base_language(locale) {
            if let Some(base_table) = tables.remove(base) {
                entries.extend(base_table);
            }
        }
        if let Some(exact) = tables.remove(locale) {
            entries.extend(exact);
        }

        if entries.is_empty() {
            warn!(locale, "no strings for locale");
        } else {
            debug!(locale, keys = entries.len(), "string table built");
        }

        StringTable {
            locale: locale.to_string(),
            entries,
        }
    }

    pub fn from_json_str(json: &str, locale: &str) -> SessionResult<Self> {
        let tables: LocaleTables = serde_json::from_str(json)?;
        Ok(Self::from_tables(tables, locale))
    }

    pub fn from_json_file(path: &Path, locale: &str) -> SessionResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SessionError::io(path, e))?;
        Self::from_json_str(&content, locale)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translator for StringTable {
    fn translate(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

/// "de-AT" → Some("de"), "pt_BR" → Some("pt"), "en" → None.
fn base_language(locale: &str) -> Option<&str> {
    locale
        .split_once(['-', '_'])
        .map(|(base, _)| base)
        .filter(|base| !base.is_empty())
}
