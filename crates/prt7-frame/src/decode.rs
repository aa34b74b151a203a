use crate::buffer::MessageBuffer;
use crate::error::{EncodeError, ParseError};
use crate::frame::Frame;
use crate::parser::parse_frame;
use crate::rotor::Rotor;

/// Parse `line` and apply the resulting frame, returning the frame applied.
///
/// On error nothing is mutated: the line is parsed completely before the
/// rotor or buffer are touched.
pub fn decode_one(
    line: &str,
    rotor: &mut Rotor,
    buffer: &mut MessageBuffer,
) -> Result<Frame, ParseError> {
    let frame = parse_frame(line)?;
    frame.process(buffer, rotor);
    Ok(frame)
}

/// Decode a whole batch of lines, skipping the ones that fail to parse.
///
/// Returns the decoded message and the failures with their line index.
pub fn decode_lines<'a, I>(lines: I) -> (MessageBuffer, Vec<(usize, ParseError)>)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut rotor = Rotor::new();
    let mut buffer = MessageBuffer::new();
    let mut failures = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        if let Err(err) = decode_one(line, &mut rotor, &mut buffer) {
            failures.push((index, err));
        }
    }

    (buffer, failures)
}

/// Build a frame script that decodes to `text` on a fresh rotor.
///
/// Before each character the next entry of `rotations` (cycled) is emitted as
/// a rotate frame; zero entries emit nothing. With no rotations the script is
/// plain load frames.
pub fn encode_message(text: &str, rotations: &[i64]) -> Result<Vec<Frame>, EncodeError> {
    let mut rotor = Rotor::new();
    let mut frames = Vec::with_capacity(text.len() * 2);
    let mut schedule = rotations.iter().copied().cycle();

    for c in text.chars() {
        if c == '\n' || c == '\r' {
            return Err(EncodeError::Untransmittable(c));
        }
        if let Some(n) = schedule.next().filter(|n| *n != 0) {
            rotor.rotate(n);
            frames.push(Frame::Rotate(n));
        }
        frames.push(Frame::Load(rotor.unmap_char(c)));
    }

    Ok(frames)
}
