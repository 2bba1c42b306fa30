use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};

use crate::application::ports::StorageError;

/// Buffer size for I/O operations. 256KB provides optimal throughput
/// for most modern storage systems while balancing memory usage.
const BUFFER_SIZE: usize = 256 * 1024;

/// Utility for computing SHA-256 fingerprints of stored archives.
///
/// Hashing happens in the same pass as the write, so the checksum handed
/// back to clients always describes the bytes that reached disk.
pub struct ContentHasher;

impl ContentHasher {
    /// Write `bytes` to `dest_path` and return (hex SHA-256, size_bytes).
    ///
    /// With `durable` set the file is fsynced before returning.
    pub async fn write_and_hash(
        dest_path: &Path,
        bytes: &[u8],
        durable: bool,
    ) -> Result<(String, u64), StorageError> {
        let mut file = tokio::io::BufWriter::with_capacity(BUFFER_SIZE, File::create(dest_path).await?);
        let mut hasher = Sha256::new();

        for chunk in bytes.chunks(BUFFER_SIZE) {
            hasher.update(chunk);
            file.write_all(chunk).await?;
        }

        file.flush().await?;
        if durable {
            file.get_mut().sync_all().await?;
        }

        Ok((hex::encode(hasher.finalize()), bytes.len() as u64))
    }

    /// Compute the hex SHA-256 of an existing file
    pub async fn hash_file(path: &Path) -> Result<String, StorageError> {
        let file = File::open(path).await?;
        let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; BUFFER_SIZE];

        loop {
            let n = reader.read(&mut buffer).await?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }

        Ok(hex::encode(hasher.finalize()))
    }

    /// Hex SHA-256 of an in-memory buffer
    pub fn hash_bytes(bytes: &[u8]) -> String {
        hex::encode(Sha256::digest(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    #[test]
    fn test_hash_bytes_known_vector() {
        assert_eq!(ContentHasher::hash_bytes(b"hello"), HELLO_SHA256);
    }

    #[tokio::test]
    async fn test_write_and_hash_matches_file_hash() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.bin");

        let (hash, size) = ContentHasher::write_and_hash(&path, b"hello", false)
            .await
            .unwrap();
        assert_eq!(hash, HELLO_SHA256);
        assert_eq!(size, 5);

        assert_eq!(ContentHasher::hash_file(&path).await.unwrap(), HELLO_SHA256);
    }
}
