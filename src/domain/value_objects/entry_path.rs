use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Archive-relative destination path of a bundle entry (e.g. "src/main.rs")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryPath(String);

impl EntryPath {
    const MAX_LENGTH: usize = 1024;

    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let raw = value.into();
        // Windows-style separators are folded so "docs\\a.md" and "docs/a.md" collide
        let normalized = raw.trim().replace('\\', "/");

        let invalid = |reason: &str| DomainError::InvalidPath {
            path: raw.clone(),
            reason: reason.to_string(),
        };

        if normalized.is_empty() {
            return Err(invalid("path cannot be blank"));
        }

        if normalized.len() > Self::MAX_LENGTH {
            return Err(invalid(&format!(
                "path too long: {} > {}",
                normalized.len(),
                Self::MAX_LENGTH
            )));
        }

        if normalized.starts_with('/') {
            return Err(invalid("absolute paths are not allowed"));
        }

        if normalized.split('/').any(|segment| segment == "..") {
            return Err(invalid("parent directory segments are not allowed"));
        }

        if normalized.chars().any(|c| c == '\0') {
            return Err(invalid("path contains a NUL character"));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntryPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for EntryPath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
