use std::io::{ErrorKind, Read};

use tracing::{debug, info, trace, warn};

use crate::buffer::MessageBuffer;
use crate::decode::decode_one;
use crate::error::{FrameError, ParseError, Result};
use crate::frame::Frame;
use crate::reader::LineReader;
use crate::rotor::Rotor;

/// When a decoding run should stop on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StopPolicy {
    /// Stop after this many received lines, rejected ones included.
    /// `None` runs until end of stream.
    pub max_lines: Option<usize>,
}

impl StopPolicy {
    /// Stop after `max_lines` received lines.
    pub fn max_lines(max_lines: usize) -> Self {
        Self {
            max_lines: Some(max_lines),
        }
    }

    fn limit_reached(&self, received: usize) -> bool {
        self.max_lines.is_some_and(|max| received >= max)
    }
}

/// Why a decoding run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// [`StopPolicy::max_lines`] lines were received.
    LimitReached,
    /// The source has no more lines.
    EndOfStream,
    /// The caller asked to stop.
    Cancelled,
}

impl StopReason {
    pub fn as_str(self) -> &'static str {
        match self {
            StopReason::LimitReached => "limit_reached",
            StopReason::EndOfStream => "end_of_stream",
            StopReason::Cancelled => "cancelled",
        }
    }
}

/// Counters for one decoding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub lines_received: usize,
    pub frames_applied: usize,
    pub frames_rejected: usize,
    pub loads: usize,
    pub rotations: usize,
}

/// The decoding loop's state: one rotor and one message buffer, owned for
/// the whole run and threaded into every frame.
#[derive(Debug, Clone, Default)]
pub struct DecodeSession {
    rotor: Rotor,
    buffer: MessageBuffer,
    stats: SessionStats,
}

impl DecodeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and apply one line.
    ///
    /// A rejected line is counted and logged; rotor and buffer are unchanged.
    pub fn feed_line(&mut self, line: &str) -> std::result::Result<Frame, ParseError> {
        self.stats.lines_received += 1;

        match decode_one(line, &mut self.rotor, &mut self.buffer) {
            Ok(frame) => {
                self.stats.frames_applied += 1;
                match frame {
                    Frame::Load(_) => self.stats.loads += 1,
                    Frame::Rotate(_) => self.stats.rotations += 1,
                }
                Ok(frame)
            }
            Err(err) => {
                self.stats.frames_rejected += 1;
                warn!(line = %line.escape_debug(), error = %err, "frame rejected");
                Err(err)
            }
        }
    }

    /// Record a line the reader had to drop before it could be parsed.
    pub(crate) fn reject_oversized(&mut self, size: usize, max: usize) {
        self.stats.lines_received += 1;
        self.stats.frames_rejected += 1;
        warn!(size, max, "line too long, dropped");
    }

    /// Pull lines from `reader` and apply them until `policy` or the caller
    /// says stop, or the source ends.
    ///
    /// `should_continue` is checked before every read. Parse failures and
    /// oversized lines never end the run; I/O errors do, except `WouldBlock`
    /// and `TimedOut`, which mean the source was idle for one read timeout
    /// and send the loop back to the stop checks.
    pub fn run<R, F>(
        &mut self,
        reader: &mut LineReader<R>,
        policy: &StopPolicy,
        mut should_continue: F,
    ) -> Result<StopReason>
    where
        R: Read,
        F: FnMut() -> bool,
    {
        loop {
            if let Some(reason) = self.check_stop(policy, &mut should_continue) {
                return Ok(reason);
            }

            let line = match reader.read_line() {
                Ok(line) => line,
                Err(FrameError::EndOfStream) => {
                    debug!("line source exhausted");
                    return Ok(StopReason::EndOfStream);
                }
                Err(FrameError::LineTooLong { size, max }) => {
                    self.reject_oversized(size, max);
                    continue;
                }
                Err(FrameError::Io(err)) if is_idle(&err) => {
                    trace!("no data within read timeout");
                    continue;
                }
                Err(err) => return Err(err),
            };

            debug!(line = %line.escape_debug(), "frame received");
            let _ = self.feed_line(&line);
        }
    }

    pub(crate) fn check_stop<F>(
        &self,
        policy: &StopPolicy,
        should_continue: &mut F,
    ) -> Option<StopReason>
    where
        F: FnMut() -> bool,
    {
        if policy.limit_reached(self.stats.lines_received) {
            info!(
                lines = self.stats.lines_received,
                "line limit reached, finishing"
            );
            return Some(StopReason::LimitReached);
        }
        if !should_continue() {
            info!("decoding cancelled");
            return Some(StopReason::Cancelled);
        }
        None
    }

    /// The message decoded so far.
    pub fn message(&self) -> String {
        self.buffer.render()
    }

    pub fn rotor(&self) -> &Rotor {
        &self.rotor
    }

    pub fn buffer(&self) -> &MessageBuffer {
        &self.buffer
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Consume the session, keeping the final rotor and message.
    pub fn into_parts(self) -> (Rotor, MessageBuffer) {
        (self.rotor, self.buffer)
    }
}

fn is_idle(err: &std::io::Error) -> bool {
    matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut)
}
