//! Key-value operations over the kv_store table

use fitledger_core::{Error, Result};
use sqlx::SqlitePool;

/// Read a single value
pub async fn kv_get(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let row: Option<(String,)> = sqlx::query_as(
        r#"
        SELECT value FROM kv_store WHERE key = ?
        "#,
    )
    .bind(key)
    .fetch_optional(pool)
    .await
    .map_err(|e| Error::StorageError(e.to_string()))?;

    Ok(row.map(|(value,)| value))
}

/// Upsert a single value
pub async fn kv_set(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO kv_store (key, value, updated_at)
        VALUES (?, ?, CURRENT_TIMESTAMP)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await
    .map_err(|e| Error::StorageError(e.to_string()))?;

    Ok(())
}

/// Upsert several values in one transaction, so a partial write can
/// never be observed after a crash
pub async fn kv_set_many(pool: &SqlitePool, entries: &[(String, String)]) -> Result<()> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| Error::StorageError(e.to_string()))?;

    for (key, value) in entries {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&mut *tx)
        .await
        .map_err(|e| Error::StorageError(e.to_string()))?;
    }

    tx.commit()
        .await
        .map_err(|e| Error::StorageError(e.to_string()))?;

    Ok(())
}

/// Delete the given keys; unknown keys are ignored
pub async fn kv_remove_many(pool: &SqlitePool, keys: &[&str]) -> Result<()> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| Error::StorageError(e.to_string()))?;

    for key in keys {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::StorageError(e.to_string()))?;
    }

    tx.commit()
        .await
        .map_err(|e| Error::StorageError(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let db = Database::connect_in_memory().await.unwrap();
        assert_eq!(kv_get(db.pool(), "nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let db = Database::connect_in_memory().await.unwrap();
        kv_set(db.pool(), "user_points", "150").await.unwrap();
        assert_eq!(
            kv_get(db.pool(), "user_points").await.unwrap().as_deref(),
            Some("150")
        );
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let db = Database::connect_in_memory().await.unwrap();
        kv_set(db.pool(), "user_points", "150").await.unwrap();
        kv_set(db.pool(), "user_points", "160").await.unwrap();
        assert_eq!(
            kv_get(db.pool(), "user_points").await.unwrap().as_deref(),
            Some("160")
        );
    }

    #[tokio::test]
    async fn test_set_many_and_remove_many() {
        let db = Database::connect_in_memory().await.unwrap();
        kv_set_many(
            db.pool(),
            &[
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
            ],
        )
        .await
        .unwrap();
        assert_eq!(kv_get(db.pool(), "b").await.unwrap().as_deref(), Some("2"));

        kv_remove_many(db.pool(), &["a", "b", "never_existed"])
            .await
            .unwrap();
        assert_eq!(kv_get(db.pool(), "a").await.unwrap(), None);
    }
}
