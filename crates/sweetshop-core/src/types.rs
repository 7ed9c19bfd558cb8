//! # Domain Types
//!
//! Core domain types used throughout the sweet shop.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Sweet       │   │   SweetInput    │   │  StockOutcome   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (engine)    │   │  name    (raw)  │   │  success        │       │
//! │  │  name           │   │  category(raw)  │   │  message        │       │
//! │  │  category       │   │  price   (raw)  │   └─────────────────┘       │
//! │  │  price          │   │  quantity(raw)  │                             │
//! │  │  quantity       │   └─────────────────┘                             │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   FilterInput   │   │ SortKey/Order   │   │ InventoryStats  │       │
//! │  │  (raw strings)  │   │ name|category|  │   │ totals, low     │       │
//! │  │                 │   │ price|quantity  │   │ stock, cats     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Sweet` serializes to exactly the persisted record shape:
//! `{"id":1001,"name":"Kaju Katli","category":"Nut-Based","price":50.0,"quantity":20}`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::validation::parse_number;
use crate::{FIRST_SWEET_ID, LOW_STOCK_THRESHOLD};

// =============================================================================
// Sweet
// =============================================================================

/// A sweet on the shop's shelf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sweet {
    /// Unique within the collection; assigned by the storage engine.
    #[ts(type = "number")]
    pub id: i64,

    pub name: String,

    pub category: String,

    /// Unit price, never negative.
    pub price: f64,

    /// Units in stock, never negative.
    #[ts(type = "number")]
    pub quantity: i64,
}

impl Sweet {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        quantity: i64,
    ) -> Self {
        Sweet {
            id,
            name: name.into(),
            category: category.into(),
            price,
            quantity,
        }
    }

    /// True when the quantity is strictly below [`LOW_STOCK_THRESHOLD`].
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity < LOW_STOCK_THRESHOLD
    }

    /// Price times quantity.
    #[inline]
    pub fn stock_value(&self) -> f64 {
        self.price * self.quantity as f64
    }

    /// Takes `amount` units off the shelf.
    ///
    /// Fails with [`CoreError::InsufficientStock`] when `amount` exceeds the
    /// current quantity, leaving the record unchanged. Zero and negative
    /// amounts are not rejected; a negative purchase adds stock.
    pub fn purchase(&mut self, amount: i64) -> CoreResult<()> {
        if amount > self.quantity {
            return Err(CoreError::InsufficientStock {
                name: self.name.clone(),
                available: self.quantity,
                requested: amount,
            });
        }

        self.quantity = self
            .quantity
            .checked_sub(amount)
            .ok_or(CoreError::StockOverflow { id: self.id })?;
        Ok(())
    }

    /// Puts `amount` units on the shelf. No upper bound.
    ///
    /// A negative amount is applied only while the result stays at or above
    /// zero; otherwise it fails like an oversized purchase.
    pub fn restock(&mut self, amount: i64) -> CoreResult<()> {
        let next = self
            .quantity
            .checked_add(amount)
            .ok_or(CoreError::StockOverflow { id: self.id })?;

        if next < 0 {
            return Err(CoreError::InsufficientStock {
                name: self.name.clone(),
                available: self.quantity,
                requested: amount.saturating_neg(),
            });
        }

        self.quantity = next;
        Ok(())
    }
}

/// Returns the id for the next sweet: one above the current maximum, or
/// [`FIRST_SWEET_ID`] for an empty collection.
///
/// ## Example
/// ```rust
/// use sweetshop_core::{next_sweet_id, seed_sweets};
///
/// assert_eq!(next_sweet_id(&[]), Some(1001));
/// assert_eq!(next_sweet_id(&seed_sweets()), Some(1004));
/// ```
pub fn next_sweet_id(sweets: &[Sweet]) -> Option<i64> {
    match sweets.iter().map(|s| s.id).max() {
        Some(max) => max.checked_add(1),
        None => Some(FIRST_SWEET_ID),
    }
}

/// The fixed three-record collection used when storage is empty or unreadable.
pub fn seed_sweets() -> Vec<Sweet> {
    vec![
        Sweet::new(1001, "Kaju Katli", "Nut-Based", 50.0, 20),
        Sweet::new(1002, "Gajar Halwa", "Vegetable-Based", 30.0, 15),
        Sweet::new(1003, "Gulab Jamun", "Milk-Based", 10.0, 50),
    ]
}

// =============================================================================
// Sweet Input (raw form data)
// =============================================================================

/// Add-form data exactly as the presentation layer collects it.
///
/// Every field is an untyped string. Run
/// [`validate`](crate::validation::validate) on it before handing it to the
/// storage engine, which only coerces types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct SweetInput {
    pub name: String,
    pub category: String,
    pub price: String,
    pub quantity: String,
}

impl SweetInput {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        SweetInput {
            name: name.into(),
            category: category.into(),
            price: price.into(),
            quantity: quantity.into(),
        }
    }

    /// Price parsed as a real number.
    pub fn coerce_price(&self) -> Option<f64> {
        parse_number(&self.price)
    }

    /// Quantity parsed as a number and truncated toward zero (`"2.7"` is 2).
    pub fn coerce_quantity(&self) -> Option<i64> {
        let value = parse_number(&self.quantity)?.trunc();
        if value < i64::MIN as f64 || value >= i64::MAX as f64 {
            return None;
        }
        Some(value as i64)
    }

    /// Builds the record the engine will store under `id`.
    ///
    /// Only coerces types; business validation is the caller's job. A value
    /// that cannot be coerced, or coerces to something negative, is refused
    /// so a bad record can never reach storage.
    pub fn into_sweet(self, id: i64) -> CoreResult<Sweet> {
        let price = self
            .coerce_price()
            .filter(|p| *p >= 0.0)
            .ok_or(ValidationError::InvalidPrice)?;
        let quantity = self
            .coerce_quantity()
            .filter(|q| *q >= 0)
            .ok_or(ValidationError::InvalidQuantity)?;

        Ok(Sweet {
            id,
            name: self.name,
            category: self.category,
            price,
            quantity,
        })
    }
}

// =============================================================================
// Stock Outcome
// =============================================================================

/// Result of a purchase or restock, ready to show to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockOutcome {
    pub success: bool,
    pub message: String,
}

impl StockOutcome {
    pub fn succeeded(message: impl Into<String>) -> Self {
        StockOutcome {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        StockOutcome {
            success: false,
            message: message.into(),
        }
    }
}

impl From<CoreError> for StockOutcome {
    fn from(err: CoreError) -> Self {
        StockOutcome::failed(err.to_string())
    }
}

// =============================================================================
// Sorting
// =============================================================================

/// Field a listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SortKey {
    Name,
    Category,
    Price,
    Quantity,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Name,
        SortKey::Category,
        SortKey::Price,
        SortKey::Quantity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Category => "category",
            SortKey::Price => "price",
            SortKey::Quantity => "quantity",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError::not_allowed("sort", &["name", "category", "price", "quantity"])
            })
    }
}

/// Direction of a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(ValidationError::not_allowed("order", &["asc", "desc"])),
        }
    }
}

// =============================================================================
// Filter Input (raw filter bar state)
// =============================================================================

/// Filter bar state as the presentation layer holds it.
///
/// An empty string means "no bound" for the prices and "all" for the
/// category. Convert with `FilterCriteria::from(&input)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct FilterInput {
    pub search_term: String,
    pub category: String,
    pub min_price: String,
    pub max_price: String,
}

impl Default for FilterInput {
    fn default() -> Self {
        FilterInput {
            search_term: String::new(),
            category: crate::ALL_CATEGORIES.to_string(),
            min_price: String::new(),
            max_price: String::new(),
        }
    }
}

// =============================================================================
// Inventory Statistics
// =============================================================================

/// Dashboard figures for a collection snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InventoryStats {
    /// Number of records.
    pub total_items: usize,

    /// Sum of quantities.
    #[ts(type = "number")]
    pub total_quantity: i64,

    /// Sum of price × quantity.
    pub total_value: f64,

    /// Records below the low-stock threshold.
    pub low_stock_count: usize,

    /// Distinct category values.
    pub category_count: usize,
}

// =============================================================================
// Unit Tests
// =============================================================================
