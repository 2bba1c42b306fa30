use bytes::Bytes;
use std::io::{self, Write};
use tokio::sync::mpsc;

/// Chunk carried from the compression thread to the response body
pub type ArchiveChunk = Result<Bytes, io::Error>;

/// Blocking `Write` adapter over a bounded channel.
///
/// Must run on a blocking thread: `write` parks until the consumer has room,
/// which is what carries backpressure from a slow client back to the
/// compressor. A dropped receiver surfaces as `BrokenPipe`.
pub struct ChannelWriter {
    tx: mpsc::Sender<ArchiveChunk>,
}

impl ChannelWriter {
    pub fn new(tx: mpsc::Sender<ArchiveChunk>) -> Self {
        Self { tx }
    }
}

impl Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        self.tx
            .blocking_send(Ok(Bytes::copy_from_slice(buf)))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "archive consumer went away"))?;

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
