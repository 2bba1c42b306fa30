pub mod files;
pub mod health;
pub mod memory;
pub mod root;
pub mod zip_bundles;

pub use files::download_archive_handler;
pub use health::{health_handler, HealthState};
pub use memory::{query_memory_handler, upsert_memory_handler};
pub use root::{not_found_handler, root_handler};
pub use zip_bundles::{create_bundle_handler, upload_bundle_handler};
