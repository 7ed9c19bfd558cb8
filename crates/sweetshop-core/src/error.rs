//! # Error Types
//!
//! Domain-specific error types for sweetshop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sweetshop-core errors (this file)                                     │
//! │  ├── CoreError        - Stock and lookup failures                      │
//! │  └── ValidationError  - Add-form field failures                        │
//! │                                                                         │
//! │  sweetshop-db errors (separate crate)                                  │
//! │  └── DbError          - Slot read/write failures                       │
//! │                                                                         │
//! │  Flow: CoreError → StockOutcome { success: false, message }            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `Display` text of `SweetNotFound`, `InsufficientStock` and every
//! `ValidationError` variant is shown to the shop user verbatim.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Inventory rule violations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// No record carries the requested id.
    #[error("Sweet not found")]
    SweetNotFound { id: i64 },

    /// Purchase asks for more than is on the shelf.
    ///
    /// ## User Workflow
    /// ```text
    /// Purchase (qty: 25) on Kaju Katli
    ///      │
    ///      ▼
    /// Check stock: available=20
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Kaju Katli", available: 20, requested: 25 }
    ///      │
    ///      ▼
    /// UI shows: "Insufficient stock! Only 20 available"
    /// ```
    #[error("Insufficient stock! Only {available} available")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Stock arithmetic left the representable range.
    #[error("Stock level for sweet {id} is out of range")]
    StockOverflow { id: i64 },

    /// Every id above the current maximum is taken.
    #[error("No sweet ids left to assign")]
    IdSpaceExhausted,

    /// A collection breaks one of the record-at-rest invariants.
    #[error("Collection integrity violated: {0}")]
    Integrity(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for the add form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Sweet name is required")]
    NameRequired,

    #[error("Category is required")]
    CategoryRequired,

    /// Price missing, not a number, or negative.
    #[error("Valid price is required")]
    InvalidPrice,

    /// Quantity missing, not a number, or negative.
    #[error("Valid quantity is required")]
    InvalidQuantity,

    /// Value is not in allowed set (sort keys and orders).
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    pub(crate) fn not_allowed(field: &str, allowed: &[&str]) -> Self {
        ValidationError::NotAllowed {
            field: field.to_string(),
            allowed: allowed.iter().map(|a| a.to_string()).collect(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Kaju Katli".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(err.to_string(), "Insufficient stock! Only 3 available");

        let err = CoreError::SweetNotFound { id: 42 };
        assert_eq!(err.to_string(), "Sweet not found");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::NameRequired.to_string(),
            "Sweet name is required"
        );
        assert_eq!(
            ValidationError::CategoryRequired.to_string(),
            "Category is required"
        );
        assert_eq!(
            ValidationError::InvalidPrice.to_string(),
            "Valid price is required"
        );
        assert_eq!(
            ValidationError::InvalidQuantity.to_string(),
            "Valid quantity is required"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::InvalidPrice.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
