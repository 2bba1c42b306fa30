use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::application::dto::{
    QueryMemoryRequest, QueryMemoryResponse, UpsertMemoryRequest, UpsertMemoryResponse,
};
use crate::application::ports::{MemoryRepository, MemoryRepositoryError};
use crate::domain::entities::MemoryEntry;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{MemoryKey, UserId};

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("{0}")]
    Validation(#[from] DomainError),

    #[error("value must be an object")]
    ValueNotObject,

    #[error("No memory entry found for userId='{user_id}' and key='{key}'")]
    NotFound { user_id: String, key: String },

    #[error("Repository error: {0}")]
    Repository(#[from] MemoryRepositoryError),
}

/// Use case: Insert or replace a memory record
pub struct UpsertMemoryUseCase {
    repo: Arc<dyn MemoryRepository>,
}

impl UpsertMemoryUseCase {
    pub fn new(repo: Arc<dyn MemoryRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        request: UpsertMemoryRequest,
    ) -> Result<UpsertMemoryResponse, MemoryError> {
        let user_id = UserId::new(&request.user_id)?;
        let key = MemoryKey::new(&request.key)?;
        let value = match request.value {
            serde_json::Value::Object(map) => map,
            _ => return Err(MemoryError::ValueNotObject),
        };

        let updated = self
            .repo
            .upsert(MemoryEntry::new(user_id.clone(), key.clone(), value))
            .await?;
        debug!(user_id = %user_id, key = %key, updated, "memory upserted");

        Ok(UpsertMemoryResponse {
            success: true,
            updated,
        })
    }
}

/// Use case: Look up a memory record
pub struct QueryMemoryUseCase {
    repo: Arc<dyn MemoryRepository>,
}

impl QueryMemoryUseCase {
    pub fn new(repo: Arc<dyn MemoryRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        request: QueryMemoryRequest,
    ) -> Result<QueryMemoryResponse, MemoryError> {
        let user_id = UserId::new(&request.user_id)?;
        let key = MemoryKey::new(&request.key)?;

        match self.repo.find(&user_id, &key).await? {
            Some(entry) => Ok(QueryMemoryResponse {
                value: entry.into_value(),
            }),
            None => Err(MemoryError::NotFound {
                user_id: user_id.to_string(),
                key: key.to_string(),
            }),
        }
    }
}
