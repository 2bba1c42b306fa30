mod channel_writer;
mod stream;
mod zip_archive_builder;

pub use channel_writer::ChannelWriter;
pub use stream::{build_in_memory, spawn_archive_stream, ArchiveByteStream};
pub use zip_archive_builder::{streaming_builder, ArchiveError, ZipArchiveBuilder};

/// Deflate level used when none is configured
pub const MAX_COMPRESSION_LEVEL: i64 = 9;
