mod entry_path;
mod file_kind;
mod memory_key;
mod project_name;
mod source_url;

pub use entry_path::EntryPath;
pub use file_kind::FileKind;
pub use memory_key::{MemoryKey, UserId};
pub use project_name::ProjectName;
pub use source_url::SourceUrl;
