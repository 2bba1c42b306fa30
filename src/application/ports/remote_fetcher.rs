use async_trait::async_trait;
use bytes::Bytes;
#[cfg(test)]
use mockall::{automock, predicate::*};
use thiserror::Error;

use crate::domain::value_objects::SourceUrl;

#[derive(Debug, Error)]
pub enum RemoteFetchError {
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },

    #[error("timed out after {timeout_secs}s fetching {url}")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("{url} exceeds the download limit of {max_bytes} bytes")]
    TooLarge { url: String, max_bytes: u64 },
}

impl RemoteFetchError {
    /// HTTP status returned by the remote server, if it answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteFetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Port for downloading the bytes of a remote file.
///
/// One attempt per call; implementations bound the call with a deadline.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RemoteFetcher: Send + Sync {
    /// Return the full body of a 200 response
    async fn fetch(&self, url: &SourceUrl) -> Result<Bytes, RemoteFetchError>;
}
