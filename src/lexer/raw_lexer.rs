use super::char_source::CharSource;
use super::token::{Position, Token, TokenKind};
use super::TokenStream;
use crate::error::{LexicalError, LexicalErrorKind, Result};
use std::io::BufRead;

/// Indentation-aware scanner producing tokens with layout markers
pub struct RawLexer<R> {
    source: CharSource<R>,
    /// Width added by each open indentation level
    indent_stack: Vec<usize>,
    /// Leading indentation of the first line is still unmeasured
    at_stream_start: bool,
    /// Set after end-of-stream or an error
    finished: bool,
}

impl<R: BufRead> RawLexer<R> {
    /// Creates a lexer over a buffered reader
    pub fn new(reader: R) -> Self {
        RawLexer::from_char_source(CharSource::new(reader))
    }

    /// Creates a lexer over an existing character source
    pub fn from_char_source(source: CharSource<R>) -> Self {
        RawLexer {
            source,
            indent_stack: Vec::new(),
            at_stream_start: true,
            finished: false,
        }
    }

    /// Current indentation width (sum of all recorded deltas)
    pub fn indent_width(&self) -> usize {
        self.indent_stack.iter().sum()
    }

    /// Number of open indentation levels
    pub fn indent_depth(&self) -> usize {
        self.indent_stack.len()
    }

    /// Scans all remaining tokens and returns them as a vector
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn scan_token(&mut self) -> Result<Option<Token>> {
        if self.at_stream_start {
            self.at_stream_start = false;
            if let Some(token) = self.scan_layout(None)? {
                return Ok(Some(token));
            }
        }

        loop {
            let Some((c, position)) = self.source.next_char()? else {
                return Ok(None);
            };

            match c {
                '\n' => {
                    if let Some(token) = self.scan_layout(Some(position))? {
                        return Ok(Some(token));
                    }
                }
                ' ' | '\t' | '\r' => {}
                '(' => return Ok(Some(Token::new(TokenKind::OpenBracket, position))),
                ')' => return Ok(Some(Token::new(TokenKind::CloseBracket, position))),
                '"' => return self.scan_string(position).map(Some),
                c => return self.scan_run(c, position).map(Some),
            }
        }
    }

    /// Measures the indentation of the next non-blank line and turns the
    /// change into a layout token. `line_break` is the position of the
    /// break that ended the previous line, `None` at the start of input.
    fn scan_layout(&mut self, line_break: Option<Position>) -> Result<Option<Token>> {
        loop {
            let mut width = 0;
            let first = loop {
                match self.source.next_char()? {
                    Some((' ', _)) => width += 1,
                    Some(('\r', _)) => {}
                    Some(('\t', position)) => {
                        return Err(
                            LexicalError::new(position, LexicalErrorKind::TabIndentation).into(),
                        )
                    }
                    other => break other,
                }
            };

            match first {
                // Trailing blank lines produce nothing
                None => return Ok(None),
                // Blank line, indentation unchanged
                Some(('\n', _)) => continue,
                Some((c, position)) => {
                    self.source.unread(c, position);
                    return self.apply_indentation(width, position, line_break);
                }
            }
        }
    }

    fn apply_indentation(
        &mut self,
        width: usize,
        position: Position,
        line_break: Option<Position>,
    ) -> Result<Option<Token>> {
        let current = self.indent_width();

        if width > current {
            self.indent_stack.push(width - current);
            tracing::debug!(line = position.line, width, "indent");
            return Ok(Some(Token::new(TokenKind::Indent(1), position)));
        }

        if width < current {
            // Find how many levels to pop before touching the stack
            let mut remaining = current;
            let mut levels = 0;
            for delta in self.indent_stack.iter().rev() {
                if remaining <= width {
                    break;
                }
                remaining -= delta;
                levels += 1;
            }
            if remaining != width {
                tracing::debug!(line = position.line, width, "ambiguous dedent");
                return Err(LexicalError::new(
                    position,
                    LexicalErrorKind::AmbiguousDedent { width },
                )
                .into());
            }

            let depth = self.indent_stack.len() - levels;
            self.indent_stack.truncate(depth);
            tracing::debug!(line = position.line, width, levels, "dedent");
            return Ok(Some(Token::new(TokenKind::Dedent(levels), position)));
        }

        Ok(line_break.map(|at| Token::new(TokenKind::StatementEnd, at)))
    }

    /// Copies the literal verbatim up to the next unescaped quote. A
    /// backslash and the character after it are kept as written.
    fn scan_string(&mut self, start: Position) -> Result<Token> {
        let unterminated = || LexicalError::new(start, LexicalErrorKind::UnterminatedString);
        let mut value = String::new();
        loop {
            match self.source.next_char()? {
                Some(('"', _)) => return Ok(Token::new(TokenKind::String(value), start)),
                Some(('\\', _)) => {
                    value.push('\\');
                    match self.source.next_char()? {
                        Some((c, _)) => value.push(c),
                        None => return Err(unterminated().into()),
                    }
                }
                Some((c, _)) => value.push(c),
                None => return Err(unterminated().into()),
            }
        }
    }

    fn scan_run(&mut self, first: char, start: Position) -> Result<Token> {
        let mut text = String::new();
        text.push(first);
        loop {
            match self.source.next_char()? {
                Some((c @ (' ' | '\n' | '\r' | ')'), position)) => {
                    self.source.unread(c, position);
                    break;
                }
                Some((c, _)) => text.push(c),
                None => break,
            }
        }
        Ok(Token::classify(text, start))
    }
}

impl<'a> RawLexer<&'a [u8]> {
    /// Creates a lexer over an in-memory string
    pub fn from_source(source: &'a str) -> Self {
        RawLexer::new(source.as_bytes())
    }
}

impl<R: BufRead> TokenStream for RawLexer<R> {
    fn next_token(&mut self) -> Result<Option<Token>> {
        if self.finished {
            return Ok(None);
        }
        let result = self.scan_token();
        if !matches!(result, Ok(Some(_))) {
            self.finished = true;
        }
        result
    }
}

impl<R: BufRead> Iterator for RawLexer<R> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}
