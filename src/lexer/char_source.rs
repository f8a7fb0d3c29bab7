use super::token::Position;
use crate::error::{LexicalError, LexicalErrorKind};
use std::io::BufRead;
use utf8_chars::BufReadCharsExt;

/// Character reader with position tracking and a single pushback slot
pub struct CharSource<R> {
    reader: R,
    /// Line of the next fresh character
    line: usize,
    /// Column of the next fresh character
    column: usize,
    pushback: Option<(char, Position)>,
}

impl<R: BufRead> CharSource<R> {
    /// Wraps a buffered reader
    pub fn new(reader: R) -> Self {
        CharSource {
            reader,
            line: 1,
            column: 1,
            pushback: None,
        }
    }

    /// Reads the next character together with its position
    pub fn next_char(&mut self) -> Result<Option<(char, Position)>, LexicalError> {
        if let Some(unit) = self.pushback.take() {
            return Ok(Some(unit));
        }

        let position = self.position();
        let c = match self.reader.read_char() {
            Ok(Some(c)) => c,
            Ok(None) => return Ok(None),
            Err(e) => {
                return Err(LexicalError::new(
                    position,
                    LexicalErrorKind::IoFailure(e.to_string()),
                ))
            }
        };

        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Ok(Some((c, position)))
    }

    /// Returns a consumed character to the stream
    pub fn unread(&mut self, c: char, position: Position) {
        debug_assert!(self.pushback.is_none(), "only one character of pushback");
        self.pushback = Some((c, position));
    }

    /// Position the next fresh character will occupy
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

impl<'a> CharSource<&'a [u8]> {
    /// Reads from an in-memory string
    pub fn from_source(source: &'a str) -> Self {
        CharSource::new(source.as_bytes())
    }
}
