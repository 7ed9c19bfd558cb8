//! # sweetshop-db: Storage Engine for the Sweet Shop
//!
//! This crate owns the persisted inventory. The whole collection lives as
//! one JSON array in a named slot of a local SQLite file, accessed through
//! sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sweet Shop Data Flow                             │
//! │                                                                         │
//! │  CLI command (sweetshop purchase 1001 2)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   sweetshop-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ SweetStore    │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ SlotRepository│    │ 001_create_  │  │   │
//! │  │   │ quota         │    │               │    │   slots.sql  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   slots(key = "sweetshop_inventory", value = "[{...}, ...]")   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Database handle and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Slot storage and the sweet store built on it
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sweetshop_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/sweetshop.db")).await?;
//! let store = db.sweets();
//!
//! let sweets = store.load().await;
//! let outcome = store.restock(1003, 25).await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::slot::SlotRepository;
pub use repository::sweet::{SweetStore, INVENTORY_SLOT_KEY};
