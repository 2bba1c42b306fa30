use std::collections::HashSet;
use std::io::{Cursor, Seek, Write};
use thiserror::Error;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Duplicate archive entry: {0}")]
    DuplicateEntry(String),

    #[error("Archive already finalized")]
    ArchiveClosed,

    #[error("Zip error: {0}")]
    Zip(#[from] ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArchiveError {
    /// True when the consumer of a streamed archive went away
    pub fn is_disconnect(&self) -> bool {
        let io = match self {
            ArchiveError::Io(e) => e,
            ArchiveError::Zip(ZipError::Io(e)) => e,
            _ => return false,
        };
        io.kind() == std::io::ErrorKind::BrokenPipe
    }
}

/// Append-then-finalize ZIP writer.
///
/// Every entry is deflated at the same level and stamped with the DOS epoch
/// (1980-01-01 00:00:00), so identical input yields identical bytes.
pub struct ZipArchiveBuilder<W: Write + Seek> {
    writer: Option<ZipWriter<W>>,
    options: SimpleFileOptions,
    names: HashSet<String>,
    bytes_in: u64,
}

impl ZipArchiveBuilder<Cursor<Vec<u8>>> {
    /// Builder that keeps the whole archive in memory
    pub fn in_memory(compression_level: i64) -> Self {
        Self::with_writer(ZipWriter::new(Cursor::new(Vec::new())), compression_level)
    }

    /// Finalize and hand back the archive bytes
    pub fn finalize_to_vec(&mut self) -> Result<Vec<u8>, ArchiveError> {
        Ok(self.finalize()?.into_inner())
    }
}

/// Builder that never seeks: bytes reach `sink` as entries are compressed
pub fn streaming_builder<S: Write>(
    sink: S,
    compression_level: i64,
) -> ZipArchiveBuilder<impl Write + Seek> {
    ZipArchiveBuilder::with_writer(ZipWriter::new_stream(sink), compression_level)
}

impl<W: Write + Seek> ZipArchiveBuilder<W> {
    fn with_writer(writer: ZipWriter<W>, compression_level: i64) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(compression_level))
            .last_modified_time(DateTime::default())
            .unix_permissions(0o644);

        Self {
            writer: Some(writer),
            options,
            names: HashSet::new(),
            bytes_in: 0,
        }
    }

    /// Add one entry under `name`
    pub fn append(&mut self, name: &str, bytes: &[u8]) -> Result<(), ArchiveError> {
        let writer = self.writer.as_mut().ok_or(ArchiveError::ArchiveClosed)?;

        if self.names.contains(name) {
            return Err(ArchiveError::DuplicateEntry(name.to_string()));
        }

        writer.start_file(name, self.options)?;
        writer.write_all(bytes)?;

        self.names.insert(name.to_string());
        self.bytes_in += bytes.len() as u64;
        Ok(())
    }

    /// Write the central directory and return the underlying writer.
    /// Any later call (append or finalize) fails with `ArchiveClosed`.
    pub fn finalize(&mut self) -> Result<W, ArchiveError> {
        let writer = self.writer.take().ok_or(ArchiveError::ArchiveClosed)?;
        Ok(writer.finish()?)
    }

    pub fn entry_count(&self) -> usize {
        self.names.len()
    }

    /// Uncompressed bytes appended so far
    pub fn bytes_in(&self) -> u64 {
        self.bytes_in
    }

    pub fn is_finalized(&self) -> bool {
        self.writer.is_none()
    }
}
