mod bundle;
mod memory_entry;

pub use bundle::{Bundle, BundleEntry, EntrySource, ResolvedBundle, ResolvedEntry};
pub use memory_entry::MemoryEntry;
