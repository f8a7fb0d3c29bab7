//! Lexical analysis for Offside
//!
//! Converts source text into a stream of tokens. The raw lexer reports
//! indentation changes as layout tokens; the normalizer rewrites them into
//! ordinary brackets so the parser only sees explicit delimiters.

mod char_source;
mod indent_normalizer;
mod raw_lexer;
mod token;

pub use char_source::CharSource;
pub use indent_normalizer::IndentNormalizer;
pub use raw_lexer::RawLexer;
pub use token::{Position, Token, TokenKind, OPERATORS};

use crate::error::Result;
use std::collections::VecDeque;

/// A pull-based producer of tokens
///
/// `Ok(None)` signals end-of-stream.
pub trait TokenStream {
    /// Produces the next token
    fn next_token(&mut self) -> Result<Option<Token>>;
}

impl<S: TokenStream + ?Sized> TokenStream for &mut S {
    fn next_token(&mut self) -> Result<Option<Token>> {
        (**self).next_token()
    }
}

/// Replays tokens that were produced elsewhere
impl TokenStream for VecDeque<Token> {
    fn next_token(&mut self) -> Result<Option<Token>> {
        Ok(self.pop_front())
    }
}
