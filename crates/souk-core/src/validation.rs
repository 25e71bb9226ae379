//! # Validation Module
//!
//! Input validation for cart mutations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Quantity steppers clamp at 1                                      │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: CartStore (Rust)                                             │
//! │  └── THIS MODULE: fast-fail before any network call                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart API server                                              │
//! │  └── Authoritative checks (stock, product status)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::MIN_ITEM_QUANTITY;

/// Validates a cart line quantity.
///
/// ## Rules
/// - Must be at least [`MIN_ITEM_QUANTITY`] (1)
///
/// ## Example
/// ```rust
/// use souk_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(-3).is_err());
/// ```
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < MIN_ITEM_QUANTITY {
        return Err(ValidationError::MustBeAtLeast {
            field: "Quantity".to_string(),
            min: MIN_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a product identifier.
///
/// ## Rules
/// - Must not be empty or whitespace
///
/// Catalog ids are opaque strings here; format checks belong to the server.
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "productId".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(5).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_quantity_error_message() {
        let err = validate_quantity(0).unwrap_err();
        assert_eq!(err.to_string(), "Quantity must be at least 1");
    }

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id("p-123").is_ok());
        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("   ").is_err());
    }
}
