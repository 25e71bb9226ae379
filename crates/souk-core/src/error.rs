//! # Error Types
//!
//! Domain-specific error types for souk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  souk-core errors (this file)                                          │
//! │  └── ValidationError  - Input validation failures (pre-network)        │
//! │                                                                         │
//! │  souk-cart errors (separate crate)                                     │
//! │  └── CartError        - Server, transport and decode failures          │
//! │                                                                         │
//! │  Flow: ValidationError → CartError → caller / last_error slot          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, bound)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input doesn't meet requirements and are rejected
/// before any network call is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is below the allowed minimum.
    ///
    /// Renders as e.g. "Quantity must be at least 1", the exact string the
    /// frontend shows next to the quantity stepper.
    #[error("{field} must be at least {min}")]
    MustBeAtLeast { field: String, min: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::MustBeAtLeast {
            field: "Quantity".to_string(),
            min: 1,
        };
        assert_eq!(err.to_string(), "Quantity must be at least 1");

        let err = ValidationError::Required {
            field: "productId".to_string(),
        };
        assert_eq!(err.to_string(), "productId is required");
    }
}
