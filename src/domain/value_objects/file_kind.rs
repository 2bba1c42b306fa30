use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::errors::DomainError;

/// Advisory classification of a bundle entry.
///
/// Only `Binary` changes processing: a binary entry with a `sourceUrl` is
/// downloaded instead of taken from inline content.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Markdown,
    Code,
    Binary,
    #[default]
    Text,
}

impl FileKind {
    pub fn is_binary(self) -> bool {
        matches!(self, FileKind::Binary)
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::Markdown => write!(f, "markdown"),
            FileKind::Code => write!(f, "code"),
            FileKind::Binary => write!(f, "binary"),
            FileKind::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for FileKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markdown" => Ok(FileKind::Markdown),
            "code" => Ok(FileKind::Code),
            "binary" => Ok(FileKind::Binary),
            "text" => Ok(FileKind::Text),
            _ => Err(DomainError::InvalidFileKind(s.to_string())),
        }
    }
}
