mod content_hasher;
mod local_bundle_store;
mod path_builder;

pub use content_hasher::ContentHasher;
pub use local_bundle_store::LocalBundleStore;
pub use path_builder::PathBuilder;
