//! # Repository Module
//!
//! Storage repositories for the sweet shop.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Presentation                                                          │
//! │       │                                                                 │
//! │       │  db.sweets().purchase(1001, 2)                                 │
//! │       ▼                                                                 │
//! │  SweetStore  (what: the inventory, its rules, its seed)                │
//! │  ├── load / save / clear                                               │
//! │  ├── add / delete_by_id                                                │
//! │  └── purchase / restock / list_categories                              │
//! │       │                                                                 │
//! │       │  whole JSON array under "sweetshop_inventory"                  │
//! │       ▼                                                                 │
//! │  SlotRepository  (how: one row per named slot)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite `slots` table                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SlotRepository`](slot::SlotRepository) - Raw named-slot storage
//! - [`SweetStore`](sweet::SweetStore) - The inventory storage engine

pub mod slot;
pub mod sweet;
