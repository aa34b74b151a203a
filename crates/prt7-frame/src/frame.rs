use std::fmt;

use tracing::{debug, trace};

use crate::buffer::MessageBuffer;
use crate::rotor::Rotor;

/// Type tag of a load frame.
pub const LOAD_TAG: char = 'L';
/// Type tag of a rotate frame.
pub const ROTATE_TAG: char = 'M';
/// Separator between the tag and the payload.
pub const SEPARATOR: char = ',';
/// Payload word that stands for the space character.
pub const SPACE_TOKEN: &str = "Space";

/// One parsed instruction from the transmitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// Decode one character through the rotor and append it.
    Load(char),
    /// Turn the rotor by a signed number of positions.
    Rotate(i64),
}

impl Frame {
    /// Apply this frame to the decoding state.
    ///
    /// Never fails. A load appends exactly one character; a rotation leaves
    /// the buffer untouched.
    pub fn process(self, buffer: &mut MessageBuffer, rotor: &mut Rotor) {
        match self {
            Frame::Load(c) => {
                let decoded = rotor.map_char(c);
                buffer.append(decoded);
                debug!(
                    fragment = %c.escape_debug(),
                    decoded = %decoded.escape_debug(),
                    message = %buffer,
                    "fragment decoded"
                );
            }
            Frame::Rotate(n) => {
                rotor.rotate(n);
                debug!(rotation = n, offset = rotor.offset(), "rotating rotor");
                trace!(%rotor, "rotor state");
            }
        }
    }

    /// Short name for logs and tables.
    pub fn kind(&self) -> &'static str {
        match self {
            Frame::Load(_) => "LOAD",
            Frame::Rotate(_) => "ROTATE",
        }
    }
}

impl fmt::Display for Frame {
    /// Wire form: `L,H`, `L,Space`, `M,+2`, `M,-1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frame::Load(' ') => write!(f, "{LOAD_TAG}{SEPARATOR}{SPACE_TOKEN}"),
            Frame::Load(c) => write!(f, "{LOAD_TAG}{SEPARATOR}{c}"),
            Frame::Rotate(n) => write!(f, "{ROTATE_TAG}{SEPARATOR}{n:+}"),
        }
    }
}
