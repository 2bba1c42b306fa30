use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;
use tokio::fs::{self, File};
use tokio::io::BufReader;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::ports::{ArchiveReader, BundleStore, StorageError, StoredArchive};
use crate::domain::value_objects::ProjectName;
use crate::infrastructure::storage::{ContentHasher, PathBuilder};

/// Local filesystem archive store.
///
/// Archives land in `<root>/zips/<sanitized-project>-<uuid>.zip` and are
/// published as `<base_url>/files/zips/<filename>`. Writes go through
/// `<root>/temp` and are renamed into place, so readers never see partial files.
pub struct LocalBundleStore {
    path_builder: PathBuilder,
    base_url: String,
    durable_writes: bool,
}

impl LocalBundleStore {
    pub fn new(root: PathBuf, base_url: impl Into<String>) -> Self {
        Self::with_durability(root, base_url, true)
    }

    pub fn with_durability(root: PathBuf, base_url: impl Into<String>, durable_writes: bool) -> Self {
        Self {
            path_builder: PathBuilder::new(root),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            durable_writes,
        }
    }

    /// Initialize storage directories
    pub async fn init(&self) -> Result<(), StorageError> {
        fs::create_dir_all(self.path_builder.temp_dir()).await?;
        fs::create_dir_all(self.path_builder.zips_dir()).await?;
        info!(root = %self.path_builder.root().display(), "local archive storage ready");
        Ok(())
    }

    /// URL under which a stored archive is served
    pub fn public_url(&self, filename: &str) -> String {
        format!("{}/files/zips/{}", self.base_url, filename)
    }

    /// Only names this store could have produced are accepted
    fn validate_filename(filename: &str) -> Result<(), StorageError> {
        let well_formed = !filename.is_empty()
            && filename.ends_with(".zip")
            && filename
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !filename.contains("..");

        if well_formed {
            Ok(())
        } else {
            Err(StorageError::InvalidName(filename.to_string()))
        }
    }
}

#[async_trait]
impl BundleStore for LocalBundleStore {
    async fn upload_zip(
        &self,
        bytes: Bytes,
        project_name: &ProjectName,
    ) -> Result<StoredArchive, StorageError> {
        let filename = format!("{}-{}.zip", project_name.sanitized(), Uuid::new_v4());
        let temp_path = self.path_builder.temp_path(Uuid::new_v4());
        let final_path = self.path_builder.zip_path(&filename);

        debug!("Writing archive to temp file: {:?}", temp_path);
        let (sha256, size_bytes) =
            match ContentHasher::write_and_hash(&temp_path, &bytes, self.durable_writes).await {
                Ok(result) => result,
                Err(e) => {
                    warn!("Failed to write archive to temp file {:?}: {}", temp_path, e);
                    let _ = fs::remove_file(&temp_path).await;
                    return Err(e);
                }
            };

        if let Err(e) = fs::rename(&temp_path, &final_path).await {
            warn!("Failed to move archive into place {:?}: {}", final_path, e);
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        info!(filename = %filename, size_bytes, "archive stored");

        Ok(StoredArchive {
            public_url: self.public_url(&filename),
            path: final_path.display().to_string(),
            filename,
            size_bytes,
            sha256,
        })
    }

    async fn open_zip(&self, filename: &str) -> Result<(ArchiveReader, u64), StorageError> {
        Self::validate_filename(filename)?;
        let path = self.path_builder.zip_path(filename);

        let file = match File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(filename.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        let size_bytes = file.metadata().await?.len();

        Ok((Box::pin(BufReader::new(file)), size_bytes))
    }

    async fn health_check(&self) -> bool {
        fs::metadata(self.path_builder.zips_dir())
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::io::AsyncReadExt;

    async fn store(dir: &TempDir) -> LocalBundleStore {
        let store = LocalBundleStore::with_durability(
            dir.path().to_path_buf(),
            "http://localhost:3000/",
            false,
        );
        store.init().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_upload_then_open_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir).await;
        let name = ProjectName::new(Some("My App".to_string()));

        let stored = store
            .upload_zip(Bytes::from_static(b"PK fake"), &name)
            .await
            .unwrap();

        assert!(stored.filename.starts_with("My-App-"));
        assert!(stored.filename.ends_with(".zip"));
        assert_eq!(
            stored.public_url,
            format!("http://localhost:3000/files/zips/{}", stored.filename)
        );
        assert_eq!(stored.size_bytes, 7);
        assert_eq!(stored.sha256, ContentHasher::hash_bytes(b"PK fake"));

        let (mut reader, size) = store.open_zip(&stored.filename).await.unwrap();
        let mut content = Vec::new();
        reader.read_to_end(&mut content).await.unwrap();
        assert_eq!(size, 7);
        assert_eq!(content, b"PK fake");
    }

    #[tokio::test]
    async fn test_uploads_get_unique_names() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir).await;
        let name = ProjectName::default();

        let a = store.upload_zip(Bytes::new(), &name).await.unwrap();
        let b = store.upload_zip(Bytes::new(), &name).await.unwrap();
        assert_ne!(a.filename, b.filename);
    }

    #[tokio::test]
    async fn test_open_missing_archive_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir).await;

        let result = store.open_zip("nope.zip").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_open_rejects_traversal_names() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir).await;

        for name in ["../secret.zip", "a/b.zip", "plain.txt", ""] {
            let result = store.open_zip(name).await;
            assert!(
                matches!(result, Err(StorageError::InvalidName(_))),
                "{name} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_health_check_reflects_directory() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir).await;
        assert!(store.health_check().await);

        let missing = LocalBundleStore::new(dir.path().join("absent"), "http://x");
        assert!(!missing.health_check().await);
    }
}
