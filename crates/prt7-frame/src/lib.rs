//! Frame grammar and rotating substitution decoder for PRT-7 transmissions.
//!
//! A transmitter sends one frame per text line:
//! - `L,<c>` loads a ciphertext character (`L,Space` for a space)
//! - `M,<n>` turns the rotor by a signed number of positions
//!
//! Each loaded character is decoded through a 27-symbol [`Rotor`]
//! (`A`..=`Z` plus space) at its current rotation and appended to the
//! [`MessageBuffer`]. Bad lines are reported and skipped; they never touch
//! the decoding state.

pub mod buffer;
pub mod decode;
pub mod error;
pub mod frame;
pub mod line;
pub mod parser;
pub mod reader;
pub mod rotor;
pub mod session;

#[cfg(feature = "async")]
pub mod codec;

pub use buffer::MessageBuffer;
pub use decode::{decode_lines, decode_one, encode_message};
pub use error::{EncodeError, FrameError, MalformedReason, ParseError, Result};
pub use frame::{Frame, LOAD_TAG, ROTATE_TAG, SEPARATOR, SPACE_TOKEN};
pub use line::{LineConfig, LineSplitter, DEFAULT_MAX_LINE};
pub use parser::parse_frame;
pub use reader::LineReader;
pub use rotor::{alphabet_index, Rotor, ALPHABET, ROTOR_SIZE};
pub use session::{DecodeSession, SessionStats, StopPolicy, StopReason};

#[cfg(feature = "async")]
pub use codec::{LineEvent, LineFrameCodec, ParsedLine};
