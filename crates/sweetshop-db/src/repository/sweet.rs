//! # Sweet Store
//!
//! The storage engine: sole owner of the persisted inventory.
//!
//! ## Read-Modify-Write
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Every Mutation Looks Like This                       │
//! │                                                                         │
//! │  load()  ─── slot missing / unparsable? ──► seed (and persist it)      │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  mutate the Vec<Sweet> in memory                                       │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  check_collection()  ─── invariant broken? ──► nothing written         │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  write whole slot    ─── rejected? ──► report failure, old slot kept   │
//! │                                                                         │
//! │  No lock is taken between load and write. Two handles writing the     │
//! │  same slot race; the later write replaces the earlier one.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The public methods never return `Err`. Storage failures are logged and
//! surface as `false`, `None` or an unsuccessful [`StockOutcome`].

use chrono::{DateTime, Utc};
use sweetshop_core::validation::check_collection;
use sweetshop_core::{
    next_sweet_id, query, seed_sweets, CoreError, CoreResult, StockOutcome, Sweet, SweetInput,
};
use tracing::{debug, error, info, warn};

use crate::error::DbResult;
use crate::repository::slot::SlotRepository;

/// Slot the inventory is stored under.
pub const INVENTORY_SLOT_KEY: &str = "sweetshop_inventory";

const PURCHASE_FAILED: &str = "Error processing purchase";
const RESTOCK_FAILED: &str = "Error updating stock";

/// Storage engine for the sweet inventory.
///
/// ## Usage
/// ```rust,ignore
/// let store = db.sweets();
///
/// let sweets = store.load().await;
/// let outcome = store.purchase(1001, 2).await;
/// println!("{}", outcome.message);
/// ```
#[derive(Debug, Clone)]
pub struct SweetStore {
    slots: SlotRepository,
    key: String,
}

impl SweetStore {
    /// Creates a store over the standard inventory slot.
    pub fn new(slots: SlotRepository) -> Self {
        SweetStore::with_key(slots, INVENTORY_SLOT_KEY)
    }

    /// Creates a store over a custom slot.
    pub fn with_key(slots: SlotRepository, key: impl Into<String>) -> Self {
        SweetStore {
            slots,
            key: key.into(),
        }
    }

    pub fn slot_key(&self) -> &str {
        &self.key
    }

    // -------------------------------------------------------------------------
    // Raw collection I/O
    // -------------------------------------------------------------------------

    /// Reads and decodes the slot. `Ok(None)` when nothing is stored.
    async fn read_collection(&self) -> DbResult<Option<Vec<Sweet>>> {
        let Some(raw) = self.slots.read(&self.key).await? else {
            return Ok(None);
        };

        let sweets: Vec<Sweet> = serde_json::from_str(&raw)?;
        check_collection(&sweets)?;
        Ok(Some(sweets))
    }

    /// Validates, encodes and writes the whole collection in one statement.
    async fn write_collection(&self, sweets: &[Sweet]) -> DbResult<()> {
        check_collection(sweets)?;
        let payload = serde_json::to_string(sweets)?;
        self.slots.write(&self.key, &payload).await
    }

    async fn seed(&self) -> Vec<Sweet> {
        let seed = seed_sweets();
        match self.write_collection(&seed).await {
            Ok(()) => info!(count = seed.len(), "Seeded inventory"),
            Err(err) => error!(error = %err, "Failed to persist seed inventory"),
        }
        seed
    }

    // -------------------------------------------------------------------------
    // Whole-collection operations
    // -------------------------------------------------------------------------

    /// Returns the persisted collection.
    ///
    /// Falls back to the seed dataset, and persists it, when nothing was
    /// ever saved or the stored data cannot be read, parsed, or breaks the
    /// collection invariants. Never fails.
    pub async fn load(&self) -> Vec<Sweet> {
        match self.read_collection().await {
            Ok(Some(sweets)) => {
                debug!(count = sweets.len(), "Loaded inventory");
                sweets
            }
            Ok(None) => {
                info!(key = %self.key, "Inventory slot empty, seeding");
                self.seed().await
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "Inventory unreadable, reseeding");
                self.seed().await
            }
        }
    }

    /// Persists `sweets` as the whole collection.
    ///
    /// Returns `false` if the collection breaks an invariant or the write
    /// is rejected; the previously stored collection is then unchanged.
    pub async fn save(&self, sweets: &[Sweet]) -> bool {
        match self.write_collection(sweets).await {
            Ok(()) => {
                debug!(count = sweets.len(), "Saved inventory");
                true
            }
            Err(err) => {
                error!(key = %self.key, error = %err, "Failed to save inventory");
                false
            }
        }
    }

    /// Removes all persisted state. The next `load` reseeds.
    pub async fn clear(&self) -> bool {
        match self.slots.remove(&self.key).await {
            Ok(removed) => {
                info!(key = %self.key, removed, "Cleared inventory");
                true
            }
            Err(err) => {
                error!(key = %self.key, error = %err, "Failed to clear inventory");
                false
            }
        }
    }

    /// When the collection was last written, if ever.
    pub async fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        match self.slots.updated_at(&self.key).await {
            Ok(at) => at,
            Err(err) => {
                warn!(key = %self.key, error = %err, "Could not read slot timestamp");
                None
            }
        }
    }

    // -------------------------------------------------------------------------
    // Record operations
    // -------------------------------------------------------------------------

    /// Adds a sweet built from form input.
    ///
    /// Assigns `max id + 1` (or 1001 for an empty collection), coerces the
    /// price to a real number and the quantity to an integer, appends and
    /// persists. Business validation is expected to have run already.
    ///
    /// ## Returns
    /// * `Some(sweet)` - Stored durably
    /// * `None` - Coercion or persistence failed; nothing was written
    pub async fn add(&self, input: &SweetInput) -> Option<Sweet> {
        let mut sweets = self.load().await;

        let Some(id) = next_sweet_id(&sweets) else {
            error!(error = %CoreError::IdSpaceExhausted, "Failed to add sweet");
            return None;
        };

        let sweet = match input.clone().into_sweet(id) {
            Ok(sweet) => sweet,
            Err(err) => {
                warn!(error = %err, "Refusing to add sweet");
                return None;
            }
        };

        sweets.push(sweet.clone());
        match self.write_collection(&sweets).await {
            Ok(()) => {
                info!(id = sweet.id, name = %sweet.name, "Added sweet");
                Some(sweet)
            }
            Err(err) => {
                error!(id, error = %err, "Failed to persist new sweet");
                None
            }
        }
    }

    /// Looks a sweet up by id.
    pub async fn find(&self, id: i64) -> Option<Sweet> {
        self.load().await.into_iter().find(|s| s.id == id)
    }

    /// Deletes the sweet with `id` and rewrites the collection.
    ///
    /// Deleting an id that is not present is a successful no-op; the
    /// result only reflects whether the rewrite succeeded.
    pub async fn delete_by_id(&self, id: i64) -> bool {
        let mut sweets = self.load().await;
        let before = sweets.len();
        sweets.retain(|s| s.id != id);

        debug!(id, removed = before - sweets.len(), "Deleting sweet");
        self.save(&sweets).await
    }

    /// Sells `quantity` units of the sweet with `id`.
    ///
    /// ## Failure Messages
    /// - `"Sweet not found"`
    /// - `"Insufficient stock! Only N available"` (quantity unchanged)
    /// - `"Error processing purchase"` (write rejected, quantity unchanged)
    pub async fn purchase(&self, id: i64, quantity: i64) -> StockOutcome {
        debug!(id, quantity, "Purchasing sweet");
        self.mutate_stock(id, PURCHASE_FAILED, |sweet| {
            sweet.purchase(quantity)?;
            Ok(format!("Purchased {} {}(s)", quantity, sweet.name))
        })
        .await
    }

    /// Adds `quantity` units to the sweet with `id`.
    pub async fn restock(&self, id: i64, quantity: i64) -> StockOutcome {
        debug!(id, quantity, "Restocking sweet");
        self.mutate_stock(id, RESTOCK_FAILED, |sweet| {
            sweet.restock(quantity)?;
            Ok("Stock updated successfully!".to_string())
        })
        .await
    }

    /// Distinct categories, ascending, case-sensitive.
    pub async fn list_categories(&self) -> Vec<String> {
        query::distinct_categories(&self.load().await)
    }

    async fn mutate_stock<F>(&self, id: i64, persist_failure: &str, apply: F) -> StockOutcome
    where
        F: FnOnce(&mut Sweet) -> CoreResult<String>,
    {
        let mut sweets = self.load().await;

        let Some(sweet) = sweets.iter_mut().find(|s| s.id == id) else {
            debug!(id, "Sweet not found");
            return CoreError::SweetNotFound { id }.into();
        };

        let message = match apply(sweet) {
            Ok(message) => message,
            Err(err) => {
                debug!(id, error = %err, "Stock change refused");
                return err.into();
            }
        };

        match self.write_collection(&sweets).await {
            Ok(()) => StockOutcome::succeeded(message),
            Err(err) => {
                error!(id, error = %err, "Failed to persist stock change");
                StockOutcome::failed(persist_failure)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
