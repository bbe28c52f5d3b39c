//! # Slot Repository
//!
//! SQLite-backed [`SlotStorage`]: one row per slot in `storage_slots`.
//!
//! ## Write Path
//! ```text
//! write_slot("quotes", payload)
//!      │
//!      ▼
//! INSERT INTO storage_slots (key, payload, updated_at)
//! ON CONFLICT(key) DO UPDATE ...      ← upsert, last write wins
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use super::SlotStorage;
use crate::error::StoreResult;

#[derive(Debug, Clone)]
pub struct SlotRepository {
    pool: SqlitePool,
}

impl SlotRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SlotRepository { pool }
    }
}

#[async_trait]
impl SlotStorage for SlotRepository {
    async fn read_slot(&self, key: &str) -> StoreResult<Option<String>> {
        let payload = sqlx::query_scalar::<_, String>(
            "SELECT payload FROM storage_slots WHERE key = ?1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        debug!(key = %key, found = payload.is_some(), "Read slot");
        Ok(payload)
    }

    async fn write_slot(&self, key: &str, payload: &str) -> StoreResult<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO storage_slots (key, payload, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(payload)
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = payload.len(), "Wrote slot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_missing_slot_reads_none() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert_eq!(db.slots().read_slot("quotes").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_replaces_previous_payload() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let slots = db.slots();

        slots.write_slot("quotes", "[1]").await.unwrap();
        slots.write_slot("quotes", "[2]").await.unwrap();
        slots.write_slot("clientAddresses", "[]").await.unwrap();

        assert_eq!(slots.read_slot("quotes").await.unwrap().as_deref(), Some("[2]"));
        assert_eq!(slots.read_slot("clientAddresses").await.unwrap().as_deref(), Some("[]"));
    }
}
