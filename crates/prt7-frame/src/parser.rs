//! Text grammar for one frame per line.
//!
//! ```text
//! frame        := load_frame | rotate_frame
//! load_frame   := "L" "," char_token
//! rotate_frame := "M" "," signed_int
//! char_token   := "Space" | <any single character>
//! signed_int   := ["+" | "-"] digit+
//! ```
//!
//! Parsing is lenient in two places: characters after the first one of a
//! load payload are ignored, and a rotate payload stops at the first
//! non-digit (no digits at all reads as zero).
//!
//! Rotate values have no upper bound. Digits that no longer fit in an `i64`
//! are folded modulo the rotor size, so the parsed value is congruent to the
//! written one and moves the rotor to the same position.

use crate::error::{MalformedReason, ParseError};
use crate::frame::{Frame, LOAD_TAG, ROTATE_TAG, SEPARATOR, SPACE_TOKEN};
use crate::rotor::ROTOR_SIZE;

/// Parse one line into a [`Frame`].
///
/// A trailing `\n`, `\r\n` or `\r` is stripped first. No other whitespace is
/// trimmed, so `"L, "` loads a literal space.
pub fn parse_frame(line: &str) -> Result<Frame, ParseError> {
    let line = strip_terminator(line);

    let mut chars = line.chars();
    let tag = chars.next().ok_or(ParseError::NoFrame)?;
    if chars.next() != Some(SEPARATOR) {
        return Err(ParseError::MalformedFrame(MalformedReason::MissingSeparator));
    }
    let payload = chars.as_str();

    match tag {
        LOAD_TAG => parse_load(payload),
        ROTATE_TAG => parse_rotate(payload),
        other => Err(ParseError::UnknownFrameType(other)),
    }
}

fn strip_terminator(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

fn parse_load(payload: &str) -> Result<Frame, ParseError> {
    if payload == SPACE_TOKEN {
        return Ok(Frame::Load(' '));
    }
    payload
        .chars()
        .next()
        .map(Frame::Load)
        .ok_or(ParseError::MalformedFrame(MalformedReason::MissingPayload))
}

fn parse_rotate(payload: &str) -> Result<Frame, ParseError> {
    if payload.is_empty() {
        return Err(ParseError::MalformedFrame(MalformedReason::MissingValue));
    }

    let (sign, digits) = match payload.as_bytes()[0] {
        b'-' => (-1i64, &payload[1..]),
        b'+' => (1i64, &payload[1..]),
        _ => (1i64, payload),
    };

    let modulus = ROTOR_SIZE as i64;
    let mut value: i64 = 0;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        let step = sign * i64::from(digit - b'0');
        value = match value.checked_mul(10).and_then(|v| v.checked_add(step)) {
            Some(next) => next,
            // `%` keeps the sign, so the folded value stays on the same side of zero.
            None => ((value % modulus) * 10 + step) % modulus,
        };
    }

    Ok(Frame::Rotate(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotor::Rotor;

    fn malformed(reason: MalformedReason) -> Result<Frame, ParseError> {
        Err(ParseError::MalformedFrame(reason))
    }

    #[test]
    fn parses_load_frames() {
        assert_eq!(parse_frame("L,H"), Ok(Frame::Load('H')));
        assert_eq!(parse_frame("L,Space"), Ok(Frame::Load(' ')));
        assert_eq!(parse_frame("L, "), Ok(Frame::Load(' ')));
        assert_eq!(parse_frame("L,,"), Ok(Frame::Load(',')));
        assert_eq!(parse_frame("L,a"), Ok(Frame::Load('a')));
    }

    #[test]
    fn load_keeps_only_first_character() {
        assert_eq!(parse_frame("L,HELLO"), Ok(Frame::Load('H')));
        assert_eq!(parse_frame("L,Spaces"), Ok(Frame::Load('S')));
        assert_eq!(parse_frame("L,Spac"), Ok(Frame::Load('S')));
    }

    #[test]
    fn parses_rotate_frames() {
        assert_eq!(parse_frame("M,2"), Ok(Frame::Rotate(2)));
        assert_eq!(parse_frame("M,+2"), Ok(Frame::Rotate(2)));
        assert_eq!(parse_frame("M,-1"), Ok(Frame::Rotate(-1)));
        assert_eq!(parse_frame("M,0"), Ok(Frame::Rotate(0)));
        assert_eq!(parse_frame("M,1000"), Ok(Frame::Rotate(1000)));
    }

    #[test]
    fn rotate_without_digits_is_zero() {
        assert_eq!(parse_frame("M,+"), Ok(Frame::Rotate(0)));
        assert_eq!(parse_frame("M,-"), Ok(Frame::Rotate(0)));
        assert_eq!(parse_frame("M,abc"), Ok(Frame::Rotate(0)));
    }

    #[test]
    fn rotate_ignores_trailing_garbage() {
        assert_eq!(parse_frame("M,12abc"), Ok(Frame::Rotate(12)));
        assert_eq!(parse_frame("M,-3 4"), Ok(Frame::Rotate(-3)));
    }

    fn offset_after(line: &str) -> usize {
        let mut rotor = Rotor::new();
        match parse_frame(line) {
            Ok(Frame::Rotate(n)) => rotor.rotate(n),
            other => panic!("expected a rotate frame, got {other:?}"),
        }
        rotor.offset()
    }

    #[test]
    fn rotate_accepts_full_i64_range() {
        assert_eq!(parse_frame("M,9223372036854775807"), Ok(Frame::Rotate(i64::MAX)));
        assert_eq!(parse_frame("M,-9223372036854775808"), Ok(Frame::Rotate(i64::MIN)));
    }

    #[test]
    fn rotate_beyond_i64_wraps_modulo_rotor() {
        // 2^63 mod 27 = 26, 10^20 mod 27 = 19, -(2^63 + 1) mod 27 = 0.
        assert_eq!(offset_after("M,9223372036854775808"), 26);
        assert_eq!(offset_after("M,100000000000000000000"), 19);
        assert_eq!(offset_after("M,-9223372036854775809"), 0);
        assert_eq!(offset_after("M,+1000000000000000000000000000000000000002"), 3);
    }

    #[test]
    fn strips_line_terminators_only() {
        assert_eq!(parse_frame("L,H\n"), Ok(Frame::Load('H')));
        assert_eq!(parse_frame("M,-4\r\n"), Ok(Frame::Rotate(-4)));
        assert_eq!(parse_frame(" L,H"), malformed(MalformedReason::MissingSeparator));
    }

    #[test]
    fn empty_line_is_no_frame() {
        assert_eq!(parse_frame(""), Err(ParseError::NoFrame));
        assert_eq!(parse_frame("\r\n"), Err(ParseError::NoFrame));
    }

    #[test]
    fn missing_separator() {
        assert_eq!(parse_frame("L"), malformed(MalformedReason::MissingSeparator));
        assert_eq!(parse_frame("LH"), malformed(MalformedReason::MissingSeparator));
        assert_eq!(parse_frame("Z5"), malformed(MalformedReason::MissingSeparator));
    }

    #[test]
    fn missing_payload_and_value() {
        assert_eq!(parse_frame("L,"), malformed(MalformedReason::MissingPayload));
        assert_eq!(parse_frame("M,"), malformed(MalformedReason::MissingValue));
    }

    #[test]
    fn unknown_frame_type() {
        assert_eq!(parse_frame("Z,5"), Err(ParseError::UnknownFrameType('Z')));
        assert_eq!(parse_frame("l,h"), Err(ParseError::UnknownFrameType('l')));
        assert_eq!(parse_frame("é,1"), Err(ParseError::UnknownFrameType('é')));
    }
}
