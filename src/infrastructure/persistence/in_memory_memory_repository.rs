use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::application::ports::{MemoryRepository, MemoryRepositoryError};
use crate::domain::entities::MemoryEntry;
use crate::domain::value_objects::{MemoryKey, UserId};

/// Process-local memory store, used when no database is configured.
/// Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryMemoryRepository {
    entries: DashMap<(UserId, MemoryKey), MemoryEntry>,
}

impl InMemoryMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl MemoryRepository for InMemoryMemoryRepository {
    async fn upsert(&self, entry: MemoryEntry) -> Result<bool, MemoryRepositoryError> {
        let id = (entry.user_id().clone(), entry.key().clone());
        match self.entries.entry(id) {
            Entry::Occupied(mut existing) => {
                existing.get_mut().replace_value(entry.into_value());
                Ok(true)
            }
            Entry::Vacant(slot) => {
                slot.insert(entry);
                Ok(false)
            }
        }
    }

    async fn find(
        &self,
        user_id: &UserId,
        key: &MemoryKey,
    ) -> Result<Option<MemoryEntry>, MemoryRepositoryError> {
        Ok(self
            .entries
            .get(&(user_id.clone(), key.clone()))
            .map(|e| e.value().clone()))
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn entry(user: &str, key: &str, value: Value) -> MemoryEntry {
        MemoryEntry::new(
            UserId::new(user).unwrap(),
            MemoryKey::new(key).unwrap(),
            object(value),
        )
    }

    #[tokio::test]
    async fn test_upsert_reports_insert_then_update() {
        let repo = InMemoryMemoryRepository::new();

        assert!(!repo.upsert(entry("u1", "prefs", json!({"a": 1}))).await.unwrap());
        assert!(repo.upsert(entry("u1", "prefs", json!({"a": 2}))).await.unwrap());
        assert_eq!(repo.len(), 1);

        let found = repo
            .find(&UserId::new("u1").unwrap(), &MemoryKey::new("prefs").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.value(), &object(json!({"a": 2})));
        assert!(found.updated_at() >= found.created_at());
    }

    #[tokio::test]
    async fn test_entries_are_scoped_per_user() {
        let repo = InMemoryMemoryRepository::new();
        repo.upsert(entry("u1", "k", json!({"owner": "u1"}))).await.unwrap();

        let other = repo
            .find(&UserId::new("u2").unwrap(), &MemoryKey::new("k").unwrap())
            .await
            .unwrap();
        assert!(other.is_none());
    }
}
