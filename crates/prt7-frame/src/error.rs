/// Why a line with a recognised shape could not become a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// The second character is not `,`.
    MissingSeparator,
    /// An `L,` line with nothing after the separator.
    MissingPayload,
    /// An `M,` line with nothing after the separator.
    MissingValue,
}

impl MalformedReason {
    pub fn as_str(self) -> &'static str {
        match self {
            MalformedReason::MissingSeparator => "missing separator",
            MalformedReason::MissingPayload => "missing payload",
            MalformedReason::MissingValue => "missing value",
        }
    }
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced when a single line cannot be turned into a frame.
///
/// All variants are recoverable: the caller skips the line and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The line was empty.
    #[error("empty line (no frame)")]
    NoFrame,

    /// The type tag was readable but the rest of the frame was not.
    #[error("malformed frame: {0}")]
    MalformedFrame(MalformedReason),

    /// The first character is neither `L` nor `M`.
    #[error("unknown frame type {0:?}")]
    UnknownFrameType(char),
}

/// Errors that can occur while reading lines from a source.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// A line exceeded the configured maximum length.
    #[error("line too long ({size} bytes, max {max})")]
    LineTooLong { size: usize, max: usize },

    /// An I/O error occurred while reading lines.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The source reached end of stream.
    #[error("end of stream")]
    EndOfStream,
}

pub type Result<T> = std::result::Result<T, FrameError>;

/// Errors produced when building a frame script for a message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// Line terminators cannot be carried inside a line-delimited frame.
    #[error("character {0:?} cannot be carried in a frame")]
    Untransmittable(char),
}
