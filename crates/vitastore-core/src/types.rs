//! # Domain Types
//!
//! Identifier and severity types shared by the favorites and cart managers.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐          ┌─────────────────────┐              │
//! │  │     ProductId       │          │      Severity       │              │
//! │  │  ─────────────────  │          │  ─────────────────  │              │
//! │  │  opaque String      │          │  Success            │              │
//! │  │  never validated    │          │  Info               │              │
//! │  │  against a catalog  │          │  Warning            │              │
//! │  └─────────────────────┘          │  Error              │              │
//! │                                   └─────────────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Product Id
// =============================================================================

/// Opaque, stable product identifier.
///
/// The core never checks an id against the catalog; an empty string is a
/// valid id as far as the managers are concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(String);

impl ProductId {
    /// Wraps a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        ProductId(id.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id and returns the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        ProductId(id)
    }
}

impl From<&ProductId> for ProductId {
    fn from(id: &ProductId) -> Self {
        id.clone()
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lets `HashSet<ProductId>` / `HashMap<ProductId, _>` be queried with `&str`.
impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Severity
// =============================================================================

/// How prominently the view layer should present a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// State changed the way the user asked (e.g. added to favorites).
    Success,
    /// Neutral feedback (e.g. removed from favorites).
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Returns the lowercase name used in logs and serialized payloads.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_product_id_display_and_conversions() {
        let id = ProductId::from("whey-900g");
        assert_eq!(id.as_str(), "whey-900g");
        assert_eq!(id.to_string(), "whey-900g");
        assert_eq!(ProductId::from("whey-900g".to_string()), id);
        assert_eq!(id.clone().into_inner(), "whey-900g");
    }

    #[test]
    fn test_product_id_borrow_lookup() {
        let mut set = HashSet::new();
        set.insert(ProductId::from("omega-3"));
        assert!(set.contains("omega-3"));
        assert!(!set.contains("creatine"));
    }

    #[test]
    fn test_product_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&ProductId::from("sku-42")).unwrap();
        assert_eq!(json, "\"sku-42\"");
    }

    #[test]
    fn test_severity_serialization() {
        assert_eq!(serde_json::to_string(&Severity::Success).unwrap(), "\"success\"");
        assert_eq!(Severity::Info.to_string(), "info");
    }
}
