//! # Slot Repository
//!
//! Key/value storage where each key names one slot holding a whole
//! serialized value. The inventory lives in a single slot.
//!
//! ## Write Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How a Slot Write Works                               │
//! │                                                                         │
//! │  write("sweetshop_inventory", "[{...},{...}]")                         │
//! │       │                                                                 │
//! │       ├── payload > quota? → QuotaExceeded, row untouched              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT ... ON CONFLICT(key) DO UPDATE   ← one statement               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Old value or new value, never a mix                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for named slot operations.
#[derive(Debug, Clone)]
pub struct SlotRepository {
    pool: SqlitePool,
    quota_bytes: Option<usize>,
}

impl SlotRepository {
    /// Creates a new SlotRepository.
    pub fn new(pool: SqlitePool, quota_bytes: Option<usize>) -> Self {
        SlotRepository { pool, quota_bytes }
    }

    /// Reads a slot.
    ///
    /// ## Returns
    /// * `Ok(Some(value))` - Slot exists
    /// * `Ok(None)` - Nothing was ever written (or the slot was removed)
    pub async fn read(&self, key: &str) -> DbResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM slots WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        debug!(key = %key, found = value.is_some(), "Read slot");
        Ok(value)
    }

    /// Replaces the whole content of a slot.
    ///
    /// ## Returns
    /// * `Ok(())` - New value stored
    /// * `Err(DbError::QuotaExceeded)` - Payload too large, old value kept
    pub async fn write(&self, key: &str, value: &str) -> DbResult<()> {
        if let Some(quota) = self.quota_bytes {
            if value.len() > quota {
                return Err(DbError::QuotaExceeded {
                    size: value.len(),
                    quota,
                });
            }
        }

        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO slots (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = value.len(), "Wrote slot");
        Ok(())
    }

    /// Removes a slot entirely.
    ///
    /// ## Returns
    /// `true` if a slot was there to remove.
    pub async fn remove(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM slots WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        debug!(key = %key, removed = result.rows_affected(), "Removed slot");
        Ok(result.rows_affected() > 0)
    }

    /// When the slot was last written.
    pub async fn updated_at(&self, key: &str) -> DbResult<Option<DateTime<Utc>>> {
        let updated_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            "SELECT updated_at FROM slots WHERE key = ?1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated_at)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};

    #[tokio::test]
    async fn test_read_missing_slot() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert_eq!(db.slots().read("nothing").await.unwrap(), None);
        assert_eq!(db.slots().updated_at("nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_replaces_value() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let slots = db.slots();

        slots.write("k", "first").await.unwrap();
        slots.write("k", "second").await.unwrap();

        assert_eq!(slots.read("k").await.unwrap().as_deref(), Some("second"));
        assert!(slots.updated_at("k").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_slots_are_independent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let slots = db.slots();

        slots.write("a", "1").await.unwrap();
        slots.write("b", "2").await.unwrap();
        assert!(slots.remove("a").await.unwrap());

        assert_eq!(slots.read("a").await.unwrap(), None);
        assert_eq!(slots.read("b").await.unwrap().as_deref(), Some("2"));
        assert!(!slots.remove("a").await.unwrap());
    }

    #[tokio::test]
    async fn test_quota_keeps_previous_value() {
        let db = Database::new(DbConfig::in_memory().slot_quota_bytes(Some(8)))
            .await
            .unwrap();
        let slots = db.slots();

        slots.write("k", "small").await.unwrap();
        let err = slots.write("k", "far too large").await.unwrap_err();

        assert!(matches!(err, DbError::QuotaExceeded { size: 13, quota: 8 }));
        assert_eq!(slots.read("k").await.unwrap().as_deref(), Some("small"));
    }
}
