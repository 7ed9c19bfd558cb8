//! # Validation Module
//!
//! Gatekeeping for the add path, plus the integrity check the storage
//! engine runs on whole collections.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Add form (presentation)                                      │
//! │  └── Collects raw strings into SweetInput                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: validate(&SweetInput)  ◄── THIS MODULE                       │
//! │  ├── Every rule runs; all failures are reported together               │
//! │  └── Purchase / restock / delete never come through here               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Storage engine                                               │
//! │  ├── Type coercion (SweetInput::into_sweet)                            │
//! │  └── check_collection before every write                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sweetshop_core::validation::validate;
//! use sweetshop_core::SweetInput;
//!
//! let report = validate(&SweetInput::new("", "Milk-Based", "5", "2"));
//! assert!(!report.is_valid);
//! assert_eq!(report.errors, vec!["Sweet name is required".to_string()]);
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Sweet, SweetInput};

/// Result type for single-field validators.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Validation Report
// =============================================================================

/// Outcome of validating one add-form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ValidationReport {
    /// True iff `errors` is empty.
    pub is_valid: bool,

    /// User-facing messages in rule order.
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn from_errors(errors: &[ValidationError]) -> Self {
        ValidationReport {
            is_valid: errors.is_empty(),
            errors: errors.iter().map(ToString::to_string).collect(),
        }
    }
}

// =============================================================================
// Number Parsing
// =============================================================================

/// Parses a raw form value as a finite real number.
///
/// Surrounding whitespace is ignored. Blank, non-numeric, `NaN` and infinite
/// values all yield `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

// =============================================================================
// Field Validators
// =============================================================================

pub fn validate_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }
    Ok(())
}

pub fn validate_category(category: &str) -> ValidationResult<()> {
    if category.trim().is_empty() {
        return Err(ValidationError::CategoryRequired);
    }
    Ok(())
}

/// Price must be present, numeric and not negative. Zero is allowed.
pub fn validate_price(price: &str) -> ValidationResult<()> {
    match parse_number(price) {
        Some(p) if p >= 0.0 => Ok(()),
        _ => Err(ValidationError::InvalidPrice),
    }
}

/// Quantity must be present, numeric and not negative. Fractions are
/// accepted here and truncated by the storage engine.
pub fn validate_quantity(quantity: &str) -> ValidationResult<()> {
    match parse_number(quantity) {
        Some(q) if q >= 0.0 => Ok(()),
        _ => Err(ValidationError::InvalidQuantity),
    }
}

/// Runs every add-form rule against `input`.
///
/// Rules do not short-circuit: a submission with an empty name and a
/// negative price gets both messages.
pub fn validate(input: &SweetInput) -> ValidationReport {
    let errors: Vec<ValidationError> = [
        validate_name(&input.name),
        validate_category(&input.category),
        validate_price(&input.price),
        validate_quantity(&input.quantity),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect();

    ValidationReport::from_errors(&errors)
}

// =============================================================================
// Collection Integrity
// =============================================================================

/// Checks the record-at-rest invariants over a whole collection.
///
/// ## Rules
/// - ids are pairwise distinct
/// - name and category are non-empty after trimming
/// - price is finite and `>= 0`
/// - quantity is `>= 0`
pub fn check_collection(sweets: &[Sweet]) -> CoreResult<()> {
    let mut seen = HashSet::with_capacity(sweets.len());

    for sweet in sweets {
        if !seen.insert(sweet.id) {
            return Err(CoreError::Integrity(format!("duplicate id {}", sweet.id)));
        }
        if sweet.name.trim().is_empty() {
            return Err(CoreError::Integrity(format!("sweet {} has no name", sweet.id)));
        }
        if sweet.category.trim().is_empty() {
            return Err(CoreError::Integrity(format!(
                "sweet {} has no category",
                sweet.id
            )));
        }
        if !sweet.price.is_finite() || sweet.price < 0.0 {
            return Err(CoreError::Integrity(format!(
                "sweet {} has invalid price {}",
                sweet.id, sweet.price
            )));
        }
        if sweet.quantity < 0 {
            return Err(CoreError::Integrity(format!(
                "sweet {} has negative quantity {}",
                sweet.id, sweet.quantity
            )));
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed_sweets;

    #[test]
    fn test_valid_input() {
        let report = validate(&SweetInput::new("Rasgulla", "Milk-Based", "12", "40"));
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_only_name_missing() {
        let report = validate(&SweetInput::new("", "X", "5", "2"));
        assert!(!report.is_valid);
        assert_eq!(report.errors, vec!["Sweet name is required"]);
    }

    #[test]
    fn test_errors_accumulate_in_rule_order() {
        let report = validate(&SweetInput::new("   ", "", "-1", "many"));
        assert!(!report.is_valid);
        assert_eq!(
            report.errors,
            vec![
                "Sweet name is required",
                "Category is required",
                "Valid price is required",
                "Valid quantity is required",
            ]
        );
    }

    #[test]
    fn test_default_input_fails_every_rule() {
        let report = validate(&SweetInput::default());
        assert_eq!(report.errors.len(), 4);
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price("0").is_ok());
        assert!(validate_price("10.50").is_ok());
        assert!(validate_price(" 7 ").is_ok());

        assert!(validate_price("").is_err());
        assert!(validate_price("  ").is_err());
        assert!(validate_price("abc").is_err());
        assert!(validate_price("-0.01").is_err());
        assert!(validate_price("NaN").is_err());
        assert!(validate_price("inf").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity("0").is_ok());
        assert!(validate_quantity("25").is_ok());
        assert!(validate_quantity("2.5").is_ok());

        assert!(validate_quantity("").is_err());
        assert!(validate_quantity("-3").is_err());
        assert!(validate_quantity("ten").is_err());
    }

    #[test]
    fn test_check_collection_accepts_seed() {
        assert!(check_collection(&seed_sweets()).is_ok());
        assert!(check_collection(&[]).is_ok());
    }

    #[test]
    fn test_check_collection_rejects_duplicates() {
        let mut sweets = seed_sweets();
        sweets[1].id = 1001;
        assert!(matches!(
            check_collection(&sweets),
            Err(CoreError::Integrity(_))
        ));
    }

    #[test]
    fn test_check_collection_rejects_bad_records() {
        let mut sweets = seed_sweets();
        sweets[0].quantity = -1;
        assert!(check_collection(&sweets).is_err());

        let mut sweets = seed_sweets();
        sweets[0].price = f64::NAN;
        assert!(check_collection(&sweets).is_err());

        let mut sweets = seed_sweets();
        sweets[2].name = " ".to_string();
        assert!(check_collection(&sweets).is_err());
    }
}
