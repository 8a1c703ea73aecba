//! # Validation Module
//!
//! Checks callers can run before handing values to the managers. The
//! managers themselves accept any id and collapse bad quantities to no-ops;
//! these helpers are for loaders and forms that want to reject input early.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog file ──► validate_product_id / validate_price ──► Catalog     │
//! │  Config file  ──► validate_quantity_limit ──────────────► CartLimits   │
//! │  Quantity form ─► validate_quantity ────────────────────► update_qty   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product id a catalog may carry.
pub const MAX_PRODUCT_ID_LEN: usize = 128;

/// Highest per-line cap a configuration may set.
pub const MAX_QUANTITY_LIMIT: i64 = 1_000_000;

/// Validates a catalog product id.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most 128 characters
///
/// ```rust
/// use vitastore_core::validation::validate_product_id;
///
/// assert!(validate_product_id("whey-900g").is_ok());
/// assert!(validate_product_id("  ").is_err());
/// ```
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product_id".to_string(),
        });
    }

    if id.len() > MAX_PRODUCT_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "product_id".to_string(),
            max: MAX_PRODUCT_ID_LEN,
        });
    }

    Ok(())
}

/// Validates a unit price in cents. Free items (0) are allowed.
pub fn validate_price(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBePositive {
            field: "price_cents".to_string(),
        });
    }
    Ok(())
}

/// Validates a quantity entered by the shopper against the line cap.
///
/// ```rust
/// use vitastore_core::validation::validate_quantity;
///
/// assert!(validate_quantity(3, 999).is_ok());
/// assert!(validate_quantity(1000, 999).is_err());
/// ```
pub fn validate_quantity(quantity: i64, max: i64) -> ValidationResult<()> {
    if quantity < 1 || quantity > max {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max,
        });
    }
    Ok(())
}

/// Validates a configured per-line cap: between 1 and `MAX_QUANTITY_LIMIT`.
pub fn validate_quantity_limit(max: i64) -> ValidationResult<()> {
    if max < 1 {
        return Err(ValidationError::MustBePositive {
            field: "max_item_quantity".to_string(),
        });
    }
    if max > MAX_QUANTITY_LIMIT {
        return Err(ValidationError::OutOfRange {
            field: "max_item_quantity".to_string(),
            min: 1,
            max: MAX_QUANTITY_LIMIT,
        });
    }
    Ok(())
}
