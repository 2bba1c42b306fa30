use bytes::Bytes;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::dto::BundleRequest;
use crate::application::ports::{RemoteFetchError, RemoteFetcher, StorageError};
use crate::application::validation::validate_bundle_request;
use crate::domain::entities::{EntrySource, ResolvedBundle, ResolvedEntry};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::ProjectName;
use crate::infrastructure::archive::{
    build_in_memory, spawn_archive_stream, ArchiveByteStream, ArchiveError, MAX_COMPRESSION_LEVEL,
};

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("{0}")]
    Validation(#[from] DomainError),

    #[error("Failed to download file from {url} for {path}: {source}")]
    RemoteFetch {
        path: String,
        url: String,
        source: RemoteFetchError,
    },

    #[error("Failed to build archive: {0}")]
    Archive(#[from] ArchiveError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Archive task failed: {0}")]
    Task(String),
}

/// Archive ready to be streamed to a client
pub struct BundleStream {
    pub project_name: ProjectName,
    pub file_count: usize,
    pub body: ArchiveByteStream,
}

/// Archive built completely in memory
#[derive(Debug)]
pub struct BuiltBundle {
    pub project_name: ProjectName,
    pub file_count: usize,
    pub bytes: Bytes,
}

/// Use case: Turn a bundle request into a ZIP archive.
///
/// Every entry is validated and resolved, remote ones included, before any
/// archive byte exists. Callers can therefore still answer with a clean error
/// response for anything except archive I/O failures.
pub struct CreateBundleUseCase {
    fetcher: Arc<dyn RemoteFetcher>,
    compression_level: i64,
}

impl CreateBundleUseCase {
    pub fn new(fetcher: Arc<dyn RemoteFetcher>) -> Self {
        Self::with_compression_level(fetcher, MAX_COMPRESSION_LEVEL)
    }

    pub fn with_compression_level(fetcher: Arc<dyn RemoteFetcher>, compression_level: i64) -> Self {
        Self {
            fetcher,
            compression_level: compression_level.clamp(0, MAX_COMPRESSION_LEVEL),
        }
    }

    /// Validate the request and resolve every entry to bytes, in request order
    pub async fn resolve(&self, request: BundleRequest) -> Result<ResolvedBundle, BundleError> {
        let bundle = validate_bundle_request(request)?;
        info!(
            project_name = %bundle.project_name(),
            file_count = bundle.len(),
            remote_count = bundle.remote_count(),
            "resolving bundle"
        );

        let (project_name, entries) = bundle.into_parts();
        let mut resolved = Vec::with_capacity(entries.len());

        // Sequential on purpose: one download in flight per request
        for entry in entries {
            let (path, source) = entry.into_parts();
            let bytes = match source {
                EntrySource::Inline(content) => Bytes::from(content),
                EntrySource::Remote(url) => {
                    debug!(path = %path, url = %url, "fetching remote entry");
                    self.fetcher.fetch(&url).await.map_err(|source| {
                        warn!(path = %path, url = %url, error = %source, "remote entry failed");
                        BundleError::RemoteFetch {
                            path: path.to_string(),
                            url: url.to_string(),
                            source,
                        }
                    })?
                }
            };
            resolved.push(ResolvedEntry { path, bytes });
        }

        Ok(ResolvedBundle::new(project_name, resolved))
    }

    /// Streaming mode: resolve, then compress on a blocking thread while the
    /// returned body is consumed
    pub async fn stream(&self, request: BundleRequest) -> Result<BundleStream, BundleError> {
        let resolved = self.resolve(request).await?;
        let project_name = resolved.project_name().clone();
        let file_count = resolved.len();

        let body = spawn_archive_stream(resolved.into_entries(), self.compression_level);

        Ok(BundleStream {
            project_name,
            file_count,
            body,
        })
    }

    /// Batch mode: resolve, then build the whole archive in memory
    pub async fn build(&self, request: BundleRequest) -> Result<BuiltBundle, BundleError> {
        let resolved = self.resolve(request).await?;
        let project_name = resolved.project_name().clone();
        let file_count = resolved.len();
        let level = self.compression_level;

        let entries = resolved.into_entries();
        let bytes = tokio::task::spawn_blocking(move || build_in_memory(&entries, level))
            .await
            .map_err(|e| BundleError::Task(e.to_string()))??;

        info!(
            project_name = %project_name,
            file_count,
            size_bytes = bytes.len(),
            "archive built"
        );

        Ok(BuiltBundle {
            project_name,
            file_count,
            bytes: Bytes::from(bytes),
        })
    }
}
