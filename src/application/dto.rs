use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::application::ports::StoredArchive;

/// Body of `POST /zip-bundles` and `POST /zip-bundles/upload`
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BundleRequest {
    /// Archive name; defaults to "project"
    #[schema(example = "my-app")]
    pub project_name: Option<String>,
    /// Alias of `projectName`, used only when `projectName` is absent
    pub filename: Option<String>,
    /// Files in archive order
    pub files: Option<Vec<FileEntryDto>>,
}

/// One file of a bundle request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileEntryDto {
    /// Path inside the archive
    #[schema(example = "src/main.rs")]
    pub path: Option<String>,
    /// Alias of `path`, used only when `path` is absent
    pub name: Option<String>,
    /// `markdown`, `code`, `binary` or `text` (default)
    pub kind: Option<String>,
    /// Literal file content; an empty string is valid
    pub content: Option<String>,
    /// http(s) URL downloaded for `binary` entries
    pub source_url: Option<String>,
    /// Advisory only
    pub language: Option<String>,
}

impl FileEntryDto {
    pub fn inline(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn remote(path: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            kind: Some("binary".to_string()),
            source_url: Some(source_url.into()),
            ..Self::default()
        }
    }
}

/// Result of a stored (batch mode) bundle
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BundleUploadResponse {
    pub download_url: String,
    pub path: String,
    pub file_count: usize,
    pub size_bytes: u64,
    /// Hex SHA-256 of the archive
    pub sha256: String,
}

impl BundleUploadResponse {
    pub fn from_stored(stored: StoredArchive, file_count: usize) -> Self {
        Self {
            download_url: stored.public_url,
            path: stored.path,
            file_count,
            size_bytes: stored.size_bytes,
            sha256: stored.sha256,
        }
    }
}

fn validate_object(value: &Value) -> Result<(), ValidationError> {
    if value.is_object() {
        Ok(())
    } else {
        Err(ValidationError::new("object").with_message("value must be an object".into()))
    }
}

/// Body of `POST /memory/upsert`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertMemoryRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "key is required"))]
    pub key: String,
    #[serde(default)]
    #[validate(custom(function = "validate_object"))]
    #[schema(value_type = Object)]
    pub value: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpsertMemoryResponse {
    pub success: bool,
    /// True when an existing record was replaced
    pub updated: bool,
}

/// Body of `POST /memory/query`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryMemoryRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "key is required"))]
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QueryMemoryResponse {
    #[schema(value_type = Object)]
    pub value: Map<String, Value>,
}
