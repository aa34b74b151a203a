use bytes::{Buf, BytesMut};

use crate::error::{FrameError, Result};

/// Default maximum line length in bytes.
pub const DEFAULT_MAX_LINE: usize = 256;

/// Configuration for cutting lines out of a byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineConfig {
    /// Longest accepted line, terminator excluded. Default: 256 bytes.
    pub max_line_length: usize,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE,
        }
    }
}

/// Incremental line splitter over a growing buffer.
///
/// Both `\n` and `\r` end a line and empty lines are skipped, so `\r\n`,
/// bare `\r` and blank lines all behave the same. Invalid UTF-8 is replaced
/// rather than rejected.
#[derive(Debug, Default)]
pub struct LineSplitter {
    discarding: bool,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next complete line from `src`.
    ///
    /// Returns `Ok(None)` if no complete line is buffered yet. A line longer
    /// than `max_line` yields [`FrameError::LineTooLong`] once; the rest of
    /// it is dropped up to the next terminator.
    pub fn split_line(&mut self, src: &mut BytesMut, max_line: usize) -> Result<Option<String>> {
        loop {
            let Some(end) = src.iter().position(|b| is_terminator(*b)) else {
                if self.discarding {
                    src.clear();
                    return Ok(None);
                }
                if src.len() > max_line {
                    let size = src.len();
                    src.clear();
                    self.discarding = true;
                    return Err(FrameError::LineTooLong {
                        size,
                        max: max_line,
                    });
                }
                return Ok(None);
            };

            let line = src.split_to(end);
            src.advance(1);

            if self.discarding {
                self.discarding = false;
                continue;
            }
            if line.is_empty() {
                continue;
            }
            if line.len() > max_line {
                return Err(FrameError::LineTooLong {
                    size: line.len(),
                    max: max_line,
                });
            }
            return Ok(Some(String::from_utf8_lossy(&line).into_owned()));
        }
    }

    /// Flush whatever is left once the source has ended.
    ///
    /// The transmitter may close without a final terminator; a non-empty tail
    /// is still a line.
    pub fn finish(&mut self, src: &mut BytesMut, max_line: usize) -> Result<Option<String>> {
        if let Some(line) = self.split_line(src, max_line)? {
            return Ok(Some(line));
        }
        let discarding = std::mem::take(&mut self.discarding);
        if src.is_empty() || discarding {
            src.clear();
            return Ok(None);
        }
        let tail = src.split();
        Ok(Some(String::from_utf8_lossy(&tail).into_owned()))
    }
}

fn is_terminator(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}
