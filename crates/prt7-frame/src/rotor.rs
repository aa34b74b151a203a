//! The 27-symbol rotating substitution table.

use std::fmt;

/// Number of symbols on the rotor.
pub const ROTOR_SIZE: usize = 27;

/// The fixed rotor alphabet: `A`..=`Z` followed by space.
pub const ALPHABET: [char; ROTOR_SIZE] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z', ' ',
];

/// Position of `c` in [`ALPHABET`], or `None` if it is not a rotor symbol.
pub fn alphabet_index(c: char) -> Option<usize> {
    match c {
        'A'..='Z' => Some(c as usize - 'A' as usize),
        ' ' => Some(ROTOR_SIZE - 1),
        _ => None,
    }
}

/// A shift cipher over [`ALPHABET`] keyed by a cumulative rotation.
///
/// `offset` counts how far the reference point has advanced from `A` and is
/// kept in `[0, 27)` after every rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rotor {
    offset: usize,
}

impl Rotor {
    /// A fresh rotor with the reference point on `A`.
    pub fn new() -> Self {
        Self::default()
    }

    /// A rotor already advanced by `offset` positions.
    pub fn with_offset(offset: i64) -> Self {
        let mut rotor = Self::new();
        rotor.rotate(offset);
        rotor
    }

    /// Current net rotation, always in `[0, 27)`.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The symbol currently under the reference point.
    pub fn head(&self) -> char {
        ALPHABET[self.offset]
    }

    /// Advance the reference point by `n` positions (negative turns back).
    pub fn rotate(&mut self, n: i64) {
        let size = ROTOR_SIZE as i64;
        let step = n.rem_euclid(size);
        self.offset = (self.offset + step as usize) % ROTOR_SIZE;
    }

    /// Substitute `input` using the current offset.
    ///
    /// Characters outside the alphabet pass through unchanged.
    pub fn map_char(&self, input: char) -> char {
        match alphabet_index(input) {
            Some(idx) => ALPHABET[(idx + self.offset) % ROTOR_SIZE],
            None => input,
        }
    }

    /// Inverse of [`Rotor::map_char`] for the current offset.
    pub fn unmap_char(&self, output: char) -> char {
        match alphabet_index(output) {
            Some(idx) => ALPHABET[(idx + ROTOR_SIZE - self.offset) % ROTOR_SIZE],
            None => output,
        }
    }
}

impl fmt::Display for Rotor {
    /// Renders the ring starting at the head, e.g. `rotor(head='C') C-D-...-B`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rotor(head={:?}) ", self.head())?;
        for step in 0..ROTOR_SIZE {
            if step > 0 {
                f.write_str("-")?;
            }
            write!(f, "{}", ALPHABET[(self.offset + step) % ROTOR_SIZE])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_rotor_is_identity() {
        let rotor = Rotor::new();
        assert_eq!(rotor.offset(), 0);
        assert_eq!(rotor.head(), 'A');
        for c in ALPHABET {
            assert_eq!(rotor.map_char(c), c);
        }
    }

    #[test]
    fn rotate_wraps_negative_offsets() {
        let mut rotor = Rotor::new();
        rotor.rotate(1);
        rotor.rotate(-3);
        assert_eq!(rotor.offset(), 25);

        let mut rotor = Rotor::new();
        rotor.rotate(-1);
        assert_eq!(rotor.offset(), 26);
        assert_eq!(rotor.head(), ' ');
    }

    #[test]
    fn rotate_handles_extreme_magnitudes() {
        let mut rotor = Rotor::new();
        rotor.rotate(i64::MAX);
        assert_eq!(rotor.offset(), (i64::MAX % 27) as usize);

        let mut rotor = Rotor::new();
        rotor.rotate(i64::MIN);
        assert_eq!(rotor.offset(), i64::MIN.rem_euclid(27) as usize);
    }

    #[test]
    fn map_char_shifts_forward() {
        let rotor = Rotor::with_offset(2);
        assert_eq!(rotor.map_char('H'), 'J');
        assert_eq!(rotor.map_char(' '), 'B');
        assert_eq!(rotor.map_char('Z'), 'A');
        assert_eq!(rotor.map_char('Y'), ' ');
    }

    #[test]
    fn non_alphabet_passes_through() {
        let rotor = Rotor::with_offset(5);
        for c in ['a', 'z', '0', ',', '!', '\t', 'é'] {
            assert_eq!(rotor.map_char(c), c);
            assert_eq!(rotor.unmap_char(c), c);
        }
    }

    #[test]
    fn unmap_inverts_map() {
        let rotor = Rotor::with_offset(11);
        for c in ALPHABET {
            assert_eq!(rotor.unmap_char(rotor.map_char(c)), c);
        }
    }

    #[test]
    fn display_starts_at_head() {
        let rotor = Rotor::with_offset(2);
        let rendered = rotor.to_string();
        assert!(rendered.starts_with("rotor(head='C') C-D-E"));
        assert!(rendered.ends_with("Z- -A-B"));
    }
}
