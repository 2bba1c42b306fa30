use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::value_objects::{MemoryKey, UserId};

/// Small JSON object remembered for a user under a key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    user_id: UserId,
    key: MemoryKey,
    value: Map<String, Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MemoryEntry {
    pub fn new(user_id: UserId, key: MemoryKey, value: Map<String, Value>) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            key,
            value,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstruct from storage
    pub fn reconstruct(
        user_id: UserId,
        key: MemoryKey,
        value: Map<String, Value>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            key,
            value,
            created_at,
            updated_at,
        }
    }

    /// Replace the stored value, keeping the creation time
    pub fn replace_value(&mut self, value: Map<String, Value>) {
        self.value = value;
        self.updated_at = Utc::now();
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn key(&self) -> &MemoryKey {
        &self.key
    }

    pub fn value(&self) -> &Map<String, Value> {
        &self.value
    }

    pub fn into_value(self) -> Map<String, Value> {
        self.value
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
