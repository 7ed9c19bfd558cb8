//! # sweetshop-core: Pure Inventory Logic for the Sweet Shop
//!
//! This crate holds everything about the inventory that can be decided
//! without touching a disk: the `Sweet` record, the form validation rules,
//! and the filter/sort/aggregate functions that answer queries.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Sweet Shop Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation (browser UI / sweetshop CLI)          │   │
//! │  │    Filter bar ──► Sweet grid ──► Add form ──► Stock buttons     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ sweetshop-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐      ┌───────────┐      ┌────────────┐         │   │
//! │  │   │   types   │      │   query   │      │ validation │         │   │
//! │  │   │   Sweet   │      │  filter   │      │  validate  │         │   │
//! │  │   │ SweetInput│      │  sort     │      │  integrity │         │   │
//! │  │   └───────────┘      │ aggregate │      └────────────┘         │   │
//! │  │                      └───────────┘                              │   │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                sweetshop-db (Storage Engine)                    │   │
//! │  │         slot persistence, CRUD, purchase / restock              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Sweet, SweetInput, StockOutcome, ...)
//! - [`query`] - Filtering, sorting and inventory statistics
//! - [`validation`] - Add-form validation and collection integrity checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use sweetshop_core::query::{self, FilterCriteria};
//! use sweetshop_core::seed_sweets;
//!
//! let sweets = seed_sweets();
//! let hits = query::filter(&sweets, &FilterCriteria::default().search("gul"));
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].name, "Gulab Jamun");
//!
//! let stats = query::aggregate(&sweets);
//! assert_eq!(stats.total_value, 1950.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod query;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;
pub use validation::ValidationReport;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Id handed to the first sweet added to an empty collection.
///
/// Ids start at 1001 rather than 1; existing stored data depends on it.
pub const FIRST_SWEET_ID: i64 = 1001;

/// Quantities strictly below this count as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Category filter value that matches every category.
pub const ALL_CATEGORIES: &str = "all";
