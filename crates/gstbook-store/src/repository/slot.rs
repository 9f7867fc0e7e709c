//! # Storage Slot Repository
//!
//! A durable string-keyed, string-valued slot, the way the browser app used
//! `localStorage`.
//!
//! ```text
//! write("saved_invoices", "[{...},{...}]")
//!      │
//!      ▼
//! INSERT ... ON CONFLICT(key) DO UPDATE   (one row per key, last write wins)
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;

/// Repository for the `storage_slots` table.
#[derive(Debug, Clone)]
pub struct SlotRepository {
    pool: SqlitePool,
}

impl SlotRepository {
    /// Creates a new SlotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SlotRepository { pool }
    }

    /// Reads the value stored under `key`, or `None` if the slot is empty.
    pub async fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM storage_slots WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        debug!(key = %key, found = value.is_some(), "Read storage slot");
        Ok(value)
    }

    /// Replaces the value stored under `key`.
    pub async fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO storage_slots (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = value.len(), "Wrote storage slot");
        Ok(())
    }

    /// Clears the slot. Returns whether anything was stored.
    pub async fn delete(&self, key: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM storage_slots WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// When the slot was last written, as stored (RFC 3339).
    pub async fn updated_at(&self, key: &str) -> StoreResult<Option<String>> {
        let updated: Option<String> =
            sqlx::query_scalar("SELECT updated_at FROM storage_slots WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(updated)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_read_missing_slot() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert_eq!(db.slots().read("nothing").await.unwrap(), None);
        assert_eq!(db.slots().updated_at("nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_then_overwrite() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let slots = db.slots();

        slots.write("k", "[1]").await.unwrap();
        assert_eq!(slots.read("k").await.unwrap().as_deref(), Some("[1]"));

        slots.write("k", "[1,2]").await.unwrap();
        assert_eq!(slots.read("k").await.unwrap().as_deref(), Some("[1,2]"));
        assert!(slots.updated_at("k").await.unwrap().is_some());

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM storage_slots")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let slots = db.slots();

        slots.write("a", "one").await.unwrap();
        slots.write("b", "two").await.unwrap();
        assert!(slots.delete("a").await.unwrap());
        assert!(!slots.delete("a").await.unwrap());

        assert_eq!(slots.read("a").await.unwrap(), None);
        assert_eq!(slots.read("b").await.unwrap().as_deref(), Some("two"));
    }
}
