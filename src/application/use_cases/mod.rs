mod create_bundle;
mod download_archive;
mod memory;
mod upload_bundle;

pub use create_bundle::{BuiltBundle, BundleError, BundleStream, CreateBundleUseCase};
pub use download_archive::DownloadArchiveUseCase;
pub use memory::{MemoryError, QueryMemoryUseCase, UpsertMemoryUseCase};
pub use upload_bundle::UploadBundleUseCase;
