use std::sync::Arc;
use tracing::info;

use crate::application::dto::{BundleRequest, BundleUploadResponse};
use crate::application::ports::BundleStore;

use super::create_bundle::{BundleError, CreateBundleUseCase};

/// Use case: Build a bundle in memory and publish it through the bundle store
pub struct UploadBundleUseCase {
    create_bundle: Arc<CreateBundleUseCase>,
    store: Arc<dyn BundleStore>,
}

impl UploadBundleUseCase {
    pub fn new(create_bundle: Arc<CreateBundleUseCase>, store: Arc<dyn BundleStore>) -> Self {
        Self {
            create_bundle,
            store,
        }
    }

    pub async fn execute(&self, request: BundleRequest) -> Result<BundleUploadResponse, BundleError> {
        let built = self.create_bundle.build(request).await?;
        let stored = self
            .store
            .upload_zip(built.bytes, &built.project_name)
            .await?;

        info!(url = %stored.public_url, file_count = built.file_count, "bundle uploaded");
        Ok(BundleUploadResponse::from_stored(stored, built.file_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::FileEntryDto;
    use crate::application::ports::{
        MockBundleStore, MockRemoteFetcher, StorageError, StoredArchive,
    };

    fn request() -> BundleRequest {
        BundleRequest {
            filename: Some("My App".to_string()),
            files: Some(vec![FileEntryDto::inline("a.txt", "hello")]),
            ..BundleRequest::default()
        }
    }

    fn use_case(store: MockBundleStore) -> UploadBundleUseCase {
        let create = Arc::new(CreateBundleUseCase::new(Arc::new(MockRemoteFetcher::new())));
        UploadBundleUseCase::new(create, Arc::new(store))
    }

    #[tokio::test]
    async fn test_upload_returns_public_url() {
        let mut store = MockBundleStore::new();
        store
            .expect_upload_zip()
            .withf(|bytes, name| bytes.starts_with(b"PK") && name.as_str() == "My App")
            .times(1)
            .returning(|bytes, _| {
                Ok(StoredArchive {
                    public_url: "http://localhost:3000/files/zips/My-App-1.zip".to_string(),
                    path: "/data/zips/My-App-1.zip".to_string(),
                    filename: "My-App-1.zip".to_string(),
                    size_bytes: bytes.len() as u64,
                    sha256: "ab".repeat(32),
                })
            });

        let response = use_case(store).execute(request()).await.unwrap();
        assert_eq!(
            response.download_url,
            "http://localhost:3000/files/zips/My-App-1.zip"
        );
        assert_eq!(response.file_count, 1);
        assert!(response.size_bytes > 0);
    }

    #[tokio::test]
    async fn test_storage_failure_is_reported() {
        let mut store = MockBundleStore::new();
        store
            .expect_upload_zip()
            .returning(|_, _| Err(StorageError::Internal("disk full".to_string())));

        let err = use_case(store).execute(request()).await.unwrap_err();
        assert!(matches!(err, BundleError::Storage(_)));
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_store() {
        let mut store = MockBundleStore::new();
        store.expect_upload_zip().never();

        let err = use_case(store)
            .execute(BundleRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BundleError::Validation(_)));
    }
}
