use std::io::{ErrorKind, Read};

use bytes::BytesMut;

use crate::error::{FrameError, Result};
use crate::line::{LineConfig, LineSplitter};

const INITIAL_BUFFER_CAPACITY: usize = 1024;
const READ_CHUNK_SIZE: usize = 1024;

/// Reads complete lines from any `Read` stream.
///
/// Handles partial reads internally — callers always get whole lines with
/// the terminator removed.
pub struct LineReader<T> {
    inner: T,
    buf: BytesMut,
    splitter: LineSplitter,
    config: LineConfig,
    eof: bool,
}

impl<T: Read> LineReader<T> {
    /// Create a new line reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, LineConfig::default())
    }

    /// Create a new line reader with explicit configuration.
    pub fn with_config(inner: T, config: LineConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            splitter: LineSplitter::new(),
            config,
            eof: false,
        }
    }

    /// Read the next non-empty line (blocking).
    ///
    /// Returns `Err(FrameError::EndOfStream)` once the source is exhausted.
    /// A `WouldBlock` or `TimedOut` read is returned as `FrameError::Io`;
    /// bytes already received stay buffered for the next call.
    pub fn read_line(&mut self) -> Result<String> {
        loop {
            if self.eof {
                return self
                    .splitter
                    .finish(&mut self.buf, self.config.max_line_length)?
                    .ok_or(FrameError::EndOfStream);
            }

            if let Some(line) = self
                .splitter
                .split_line(&mut self.buf, self.config.max_line_length)?
            {
                return Ok(line);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                self.eof = true;
                continue;
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current line reader configuration.
    pub fn config(&self) -> &LineConfig {
        &self.config
    }
}

impl<T: Read> Iterator for LineReader<T> {
    type Item = Result<String>;

    /// Yields lines until end of stream; other errors are yielded as items.
    fn next(&mut self) -> Option<Self::Item> {
        match self.read_line() {
            Ok(line) => Some(Ok(line)),
            Err(FrameError::EndOfStream) => None,
            Err(err) => Some(Err(err)),
        }
    }
}
