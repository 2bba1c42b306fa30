use bytes::Bytes;
use futures_util::stream::{self, BoxStream, StreamExt};
use std::io::{self, BufWriter, Write};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use super::channel_writer::{ArchiveChunk, ChannelWriter};
use super::zip_archive_builder::{streaming_builder, ArchiveError, ZipArchiveBuilder};
use crate::domain::entities::ResolvedEntry;

/// Bytes handed to the compressor's sink before they are forwarded as one chunk
const CHUNK_SIZE: usize = 64 * 1024;

/// Chunks the compressor may run ahead of a slow client
const CHANNEL_CAPACITY: usize = 8;

/// Live ZIP body; an `Err` item means the archive was cut short
pub type ArchiveByteStream = BoxStream<'static, ArchiveChunk>;

/// Compress resolved entries into one in-memory archive (batch mode)
pub fn build_in_memory(
    entries: &[ResolvedEntry],
    compression_level: i64,
) -> Result<Vec<u8>, ArchiveError> {
    let mut builder = ZipArchiveBuilder::in_memory(compression_level);
    for entry in entries {
        builder.append(entry.path.as_str(), &entry.bytes)?;
    }
    builder.finalize_to_vec()
}

/// Start compressing on a blocking thread and return the archive as a stream.
///
/// Entries are already resolved, so the only failures left are archive I/O
/// errors. A consumer that drops the stream stops the compressor at its next write.
pub fn spawn_archive_stream(
    entries: Vec<ResolvedEntry>,
    compression_level: i64,
) -> ArchiveByteStream {
    let (tx, rx) = mpsc::channel::<ArchiveChunk>(CHANNEL_CAPACITY);
    let error_tx = tx.clone();

    tokio::task::spawn_blocking(move || {
        let sink = BufWriter::with_capacity(CHUNK_SIZE, ChannelWriter::new(tx));
        match write_archive(sink, &entries, compression_level) {
            Ok((entry_count, bytes_in)) => {
                debug!(entry_count, bytes_in, "archive stream finished")
            }
            Err(e) if e.is_disconnect() => {
                info!("client disconnected before the archive was complete");
            }
            Err(e) => {
                error!(error = %e, "archive stream failed");
                let _ = error_tx.blocking_send(Err(io::Error::other(e.to_string())));
            }
        }
    });

    stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|chunk| (chunk, rx))
    })
    .boxed()
}

fn write_archive<S: Write>(
    sink: S,
    entries: &[ResolvedEntry],
    compression_level: i64,
) -> Result<(usize, u64), ArchiveError> {
    let mut builder = streaming_builder(sink, compression_level);
    for entry in entries {
        builder.append(entry.path.as_str(), &entry.bytes)?;
    }
    let mut inner = builder.finalize()?;
    inner.flush()?;
    Ok((builder.entry_count(), builder.bytes_in()))
}
