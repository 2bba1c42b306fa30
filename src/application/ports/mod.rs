mod bundle_store;
mod memory_repository;
mod remote_fetcher;

pub use bundle_store::{ArchiveReader, BundleStore, StorageError, StoredArchive};
pub use memory_repository::{MemoryRepository, MemoryRepositoryError};
pub use remote_fetcher::{RemoteFetchError, RemoteFetcher};

#[cfg(test)]
pub use bundle_store::MockBundleStore;
#[cfg(test)]
pub use memory_repository::MockMemoryRepository;
#[cfg(test)]
pub use remote_fetcher::MockRemoteFetcher;
