use async_trait::async_trait;
use bytes::Bytes;
#[cfg(test)]
use mockall::{automock, predicate::*};
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

use crate::domain::value_objects::ProjectName;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive not found: {0}")]
    NotFound(String),

    #[error("Invalid archive name: {0}")]
    InvalidName(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Type alias for async reader over a stored archive
pub type ArchiveReader = Pin<Box<dyn AsyncRead + Send>>;

/// Location and fingerprint of an uploaded archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredArchive {
    pub public_url: String,
    pub path: String,
    pub filename: String,
    pub size_bytes: u64,
    /// Hex SHA-256 of the stored bytes
    pub sha256: String,
}

/// Port for persisting finished archives (batch mode)
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BundleStore: Send + Sync {
    /// Persist archive bytes under a unique name derived from the project name
    async fn upload_zip(
        &self,
        bytes: Bytes,
        project_name: &ProjectName,
    ) -> Result<StoredArchive, StorageError>;

    /// Open a previously stored archive by file name, returning (reader, size_bytes)
    async fn open_zip(&self, filename: &str) -> Result<(ArchiveReader, u64), StorageError>;

    /// Whether the backing storage is reachable
    async fn health_check(&self) -> bool;
}
