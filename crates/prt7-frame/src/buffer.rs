use std::fmt;

/// Append-only sequence of decoded characters, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBuffer {
    chars: Vec<char>,
}

impl MessageBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `c` at the end. Any character is accepted.
    pub fn append(&mut self, c: char) {
        self.chars.push(c);
    }

    /// The full message in insertion order.
    pub fn render(&self) -> String {
        self.chars.iter().collect()
    }

    /// Borrow the decoded characters.
    pub fn as_chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl fmt::Display for MessageBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_order() {
        let mut buffer = MessageBuffer::new();
        assert!(buffer.is_empty());

        buffer.append('H');
        buffer.append('I');
        buffer.append('!');

        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.as_chars(), &['H', 'I', '!']);
        assert_eq!(buffer.render(), "HI!");
    }

    #[test]
    fn render_is_repeatable() {
        let mut buffer = MessageBuffer::new();
        buffer.append('O');
        buffer.append('K');

        assert_eq!(buffer.render(), buffer.render());
        assert_eq!(buffer.to_string(), "OK");
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn empty_renders_empty_string() {
        assert_eq!(MessageBuffer::new().render(), "");
    }
}
