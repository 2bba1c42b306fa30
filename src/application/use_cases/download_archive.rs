use std::sync::Arc;

use crate::application::ports::{ArchiveReader, BundleStore, StorageError};

/// Use case: Open a previously stored archive for download
pub struct DownloadArchiveUseCase {
    store: Arc<dyn BundleStore>,
}

impl DownloadArchiveUseCase {
    pub fn new(store: Arc<dyn BundleStore>) -> Self {
        Self { store }
    }

    /// Returns the reader and the archive size in bytes
    pub async fn execute(&self, filename: &str) -> Result<(ArchiveReader, u64), StorageError> {
        self.store.open_zip(filename).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockBundleStore;
    use std::io::Cursor;

    #[tokio::test]
    async fn test_download_passes_through_store() {
        let mut store = MockBundleStore::new();
        store
            .expect_open_zip()
            .withf(|name| name == "a.zip")
            .returning(|_| Ok((Box::pin(Cursor::new(b"PK".to_vec())), 2)));

        let (_, size) = DownloadArchiveUseCase::new(Arc::new(store))
            .execute("a.zip")
            .await
            .unwrap();
        assert_eq!(size, 2);
    }

    #[tokio::test]
    async fn test_missing_archive_is_not_found() {
        let mut store = MockBundleStore::new();
        store
            .expect_open_zip()
            .returning(|name| Err(StorageError::NotFound(name.to_string())));

        let result = DownloadArchiveUseCase::new(Arc::new(store))
            .execute("gone.zip")
            .await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }
}
