use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

const MAX_LENGTH: usize = 255;

fn validate(value: &str, field: &'static str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::MissingField { field });
    }
    if trimmed.len() > MAX_LENGTH {
        return Err(DomainError::FieldTooLong {
            field,
            len: trimmed.len(),
            max: MAX_LENGTH,
        });
    }
    Ok(trimmed.to_string())
}

/// Owner of a memory record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: &str) -> Result<Self, DomainError> {
        validate(value, "userId").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key of a memory record, unique per user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemoryKey(String);

impl MemoryKey {
    pub fn new(value: &str) -> Result<Self, DomainError> {
        validate(value, "key").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MemoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_missing() {
        assert_eq!(
            UserId::new("  ").unwrap_err().to_string(),
            "userId is required"
        );
        assert_eq!(MemoryKey::new("").unwrap_err().to_string(), "key is required");
    }

    #[test]
    fn test_values_are_trimmed() {
        assert_eq!(UserId::new(" u-1 ").unwrap().as_str(), "u-1");
    }

    #[test]
    fn test_rejects_overlong_key() {
        assert!(MemoryKey::new(&"k".repeat(256)).is_err());
    }
}
