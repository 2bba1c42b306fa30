use async_trait::async_trait;
#[cfg(test)]
use mockall::{automock, predicate::*};
use thiserror::Error;

use crate::domain::entities::MemoryEntry;
use crate::domain::value_objects::{MemoryKey, UserId};

#[derive(Debug, Error)]
pub enum MemoryRepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Port for memory record persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MemoryRepository: Send + Sync {
    /// Insert or replace; returns true when an existing record was replaced
    async fn upsert(&self, entry: MemoryEntry) -> Result<bool, MemoryRepositoryError>;

    async fn find(
        &self,
        user_id: &UserId,
        key: &MemoryKey,
    ) -> Result<Option<MemoryEntry>, MemoryRepositoryError>;

    /// Whether the backing store is reachable
    async fn health_check(&self) -> bool;
}
