//! Character cursor over CoRE Link / query text
//!
//! Attribute grammars are ASCII-only. Non-ASCII characters fail every
//! character-class test but can still be consumed inside quoted strings.

use crate::error::{Lwm2mError, Result};

/// Cursor over a string being parsed
///
/// Owned by a single parse call. On success, callers leave it positioned
/// right after the last consumed character.
#[derive(Debug, Clone)]
pub struct StringParser<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> StringParser<'a> {
    /// Create a parser positioned at the start of `input`
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// The full string being parsed
    pub fn string_to_parse(&self) -> &'a str {
        self.input
    }

    /// Current byte offset, always on a char boundary
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn has_more_chars(&self) -> bool {
        self.position < self.input.len()
    }

    /// Peek the next character without consuming it
    pub fn next_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    pub fn next_char_is(&self, ch: char) -> bool {
        self.next_char() == Some(ch)
    }

    pub fn next_char_is_digit(&self) -> bool {
        self.next_char().is_some_and(|c| c.is_ascii_digit())
    }

    pub fn next_char_is_alpha(&self) -> bool {
        self.next_char().is_some_and(|c| c.is_ascii_alphabetic())
    }

    /// Consume the next character whatever it is
    pub fn consume_next_char(&mut self) -> Result<char> {
        match self.next_char() {
            Some(c) => {
                self.position += c.len_utf8();
                Ok(c)
            }
            None => Err(self.error(format!("unexpected end of input in {}", self.input))),
        }
    }

    /// Consume `ch` or fail
    pub fn consume_char(&mut self, ch: char) -> Result<()> {
        if self.next_char_is(ch) {
            self.position += ch.len_utf8();
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", ch)))
        }
    }

    /// Consume one mandatory DIGIT
    pub fn consume_digit(&mut self) -> Result<char> {
        if self.next_char_is_digit() {
            self.consume_next_char()
        } else {
            Err(self.unexpected("DIGIT"))
        }
    }

    /// Consume one mandatory ALPHA / DIGIT
    pub fn consume_alpha_digit(&mut self) -> Result<char> {
        if self.next_char_is_alpha() || self.next_char_is_digit() {
            self.consume_next_char()
        } else {
            Err(self.unexpected("ALPHA or DIGIT"))
        }
    }

    /// Text between two byte offsets previously returned by [`Self::position`]
    pub fn substring(&self, start: usize, end: usize) -> &'a str {
        &self.input[start..end]
    }

    /// Build a parse error at the current position
    pub fn error(&self, message: impl Into<String>) -> Lwm2mError {
        Lwm2mError::Parse {
            message: message.into(),
            position: self.position,
        }
    }

    fn unexpected(&self, expected: &str) -> Lwm2mError {
        let found = match self.next_char() {
            Some(c) => format!("'{}'", c.escape_default()),
            None => "end of input".to_string(),
        };
        self.error(format!(
            "expected {} but found {} at index {} in {}",
            expected, found, self.position, self.input
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_digits() {
        let mut parser = StringParser::new("12a");
        assert_eq!(parser.consume_digit().unwrap(), '1');
        assert!(parser.next_char_is_digit());
        parser.consume_next_char().unwrap();
        assert!(parser.consume_digit().is_err());
        assert_eq!(parser.position(), 2);
        assert_eq!(parser.substring(0, 2), "12");
    }

    #[test]
    fn test_end_of_input() {
        let mut parser = StringParser::new("");
        assert!(!parser.has_more_chars());
        assert!(parser.next_char().is_none());

        let err = parser.consume_digit().unwrap_err();
        assert!(err.to_string().contains("end of input"));
    }

    #[test]
    fn test_consume_char() {
        let mut parser = StringParser::new("=x");
        parser.consume_char('=').unwrap();
        let err = parser.consume_char('=').unwrap_err();
        match err {
            Lwm2mError::Parse { position, message } => {
                assert_eq!(position, 1);
                assert!(message.contains("'x'"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_ascii_is_not_a_digit() {
        let parser = StringParser::new("é");
        assert!(!parser.next_char_is_digit());
        assert!(!parser.next_char_is_alpha());
    }
}
