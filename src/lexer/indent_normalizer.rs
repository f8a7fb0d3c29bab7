use super::token::{Position, Token, TokenKind};
use super::TokenStream;
use crate::error::Result;
use std::collections::VecDeque;

/// Rewrites layout tokens into explicit brackets
///
/// Every indented block and every statement inside a block becomes its own
/// bracketed group:
///
/// ```text
/// f x              f x ( a ) ( b )
///     a      =>
///     b
/// ```
///
/// Top-level statements have no enclosing group to close, so the first one
/// stays flat in the root while each later one is bracketed: `a\nb\nc`
/// normalizes to `a ( b ) ( c )` and parses as `(a (b) (c))`.
pub struct IndentNormalizer<S> {
    inner: S,
    /// Closers owed by a multi-level dedent, or synthesized at end-of-stream
    pending: VecDeque<Token>,
    /// Next pass-through token must be preceded by an opener
    open_next: bool,
    /// Implicit groups opened and not yet closed
    open_groups: usize,
    last_position: Position,
    finished: bool,
}

impl<S: TokenStream> IndentNormalizer<S> {
    /// Wraps a stream that may contain layout tokens
    pub fn new(inner: S) -> Self {
        IndentNormalizer {
            inner,
            pending: VecDeque::new(),
            open_next: false,
            open_groups: 0,
            last_position: Position::default(),
            finished: false,
        }
    }

    /// Number of implicit groups currently open
    pub fn open_groups(&self) -> usize {
        self.open_groups
    }

    /// Collects the remaining normalized stream
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn close(&self, position: Position) -> Token {
        tracing::trace!(line = position.line, column = position.column, "synthesized close");
        Token::new(TokenKind::CloseBracket, position)
    }

    fn finish(&mut self) -> Option<Token> {
        self.finished = true;
        // No statement follows a trailing flag
        self.open_next = false;
        for _ in 0..self.open_groups {
            let close = self.close(self.last_position);
            self.pending.push_back(close);
        }
        self.open_groups = 0;
        self.pending.pop_front()
    }
}

impl<S: TokenStream> TokenStream for IndentNormalizer<S> {
    fn next_token(&mut self) -> Result<Option<Token>> {
        if let Some(token) = self.pending.pop_front() {
            return Ok(Some(token));
        }
        if self.finished {
            return Ok(None);
        }

        loop {
            let Some(token) = self.inner.next_token()? else {
                return Ok(self.finish());
            };
            self.last_position = token.position;

            match token.kind {
                TokenKind::StatementEnd => {
                    self.open_next = true;
                    // Between top-level statements there is no group to close
                    if self.open_groups > 0 {
                        self.open_groups -= 1;
                        return Ok(Some(self.close(token.position)));
                    }
                }
                TokenKind::Indent(_) => self.open_next = true,
                TokenKind::Dedent(levels) => {
                    self.open_groups = self.open_groups.saturating_sub(levels);
                    for _ in 1..levels {
                        let close = self.close(token.position);
                        self.pending.push_back(close);
                    }
                    return Ok(Some(self.close(token.position)));
                }
                _ => {
                    if self.open_next {
                        self.open_next = false;
                        self.open_groups += 1;
                        tracing::trace!(line = token.position.line, "synthesized open");
                        let open = Token::new(TokenKind::OpenBracket, token.position);
                        self.pending.push_back(token);
                        return Ok(Some(open));
                    }
                    return Ok(Some(token));
                }
            }
        }
    }
}

impl<S: TokenStream> Iterator for IndentNormalizer<S> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}
