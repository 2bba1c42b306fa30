use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::application::ports::{MemoryRepository, MemoryRepositoryError};
use crate::domain::entities::MemoryEntry;
use crate::domain::value_objects::{MemoryKey, UserId};

pub struct PostgresMemoryRepository {
    pool: PgPool,
}

impl PostgresMemoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemoryRepository for PostgresMemoryRepository {
    async fn upsert(&self, entry: MemoryEntry) -> Result<bool, MemoryRepositoryError> {
        // xmax is non-zero only for rows touched by the ON CONFLICT branch
        let row = sqlx::query_as::<_, (bool,)>(
            r#"
            INSERT INTO memory_entries (user_id, key, value, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, key) DO UPDATE
                SET value = EXCLUDED.value, updated_at = EXCLUDED.updated_at
            RETURNING (xmax <> 0) AS updated
            "#,
        )
        .bind(entry.user_id().as_str())
        .bind(entry.key().as_str())
        .bind(Json(entry.value()))
        .bind(entry.created_at())
        .bind(entry.updated_at())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    async fn find(
        &self,
        user_id: &UserId,
        key: &MemoryKey,
    ) -> Result<Option<MemoryEntry>, MemoryRepositoryError> {
        let row = sqlx::query_as::<_, MemoryRow>(
            r#"
            SELECT user_id, key, value, created_at, updated_at
            FROM memory_entries
            WHERE user_id = $1 AND key = $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(MemoryRow::into_domain).transpose()
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

#[derive(sqlx::FromRow)]
struct MemoryRow {
    user_id: String,
    key: String,
    value: Json<Value>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl MemoryRow {
    fn into_domain(self) -> Result<MemoryEntry, MemoryRepositoryError> {
        let user_id = UserId::new(&self.user_id)
            .map_err(|e| MemoryRepositoryError::Serialization(e.to_string()))?;
        let key =
            MemoryKey::new(&self.key).map_err(|e| MemoryRepositoryError::Serialization(e.to_string()))?;
        let value: Map<String, Value> = match self.value.0 {
            Value::Object(map) => map,
            other => {
                return Err(MemoryRepositoryError::Serialization(format!(
                    "stored value for {}/{} is not an object: {}",
                    self.user_id, self.key, other
                )))
            }
        };

        Ok(MemoryEntry::reconstruct(
            user_id,
            key,
            value,
            self.created_at,
            self.updated_at,
        ))
    }
}
