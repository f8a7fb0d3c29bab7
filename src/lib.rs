//! # Offside - Layout-Sensitive S-Expression Front End
//!
//! Offside reads source text for a small Lisp-like language that uses
//! indentation instead of explicit block delimiters, and produces a canonical
//! parenthesized tree.
//!
//! ## Quick Start
//!
//! ```rust
//! use offside::{parse, Result};
//!
//! # fn main() -> Result<()> {
//! let code = "my-fun = fn (a b)\n    print \"hello world\"";
//!
//! let tree = parse(code)?;
//! assert_eq!(tree.to_string(), "(my-fun = fn (a b) (print \"hello world\"))");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Source → CharSource → RawLexer → IndentNormalizer → TreeBuilder → Tree
//! ```
//!
//! Every stage is pull-based: it produces one token when its consumer asks
//! for one, through [`TokenStream::next_token`].
//!
//! - [`RawLexer`] - scans characters and reports indentation changes as
//!   `Indent`, `Dedent` and `StatementEnd` tokens
//! - [`IndentNormalizer`] - rewrites those layout tokens into brackets
//! - [`TreeBuilder`] - assembles the bracket-only stream into a [`Tree`]
//! - [`Frontend`] - runs the pipeline with a [`FrontendConfig`]
//!
//! ## Layout Rules
//!
//! - Indentation is spaces only; a tab in leading whitespace is an error
//! - A deeper line opens a group that lasts until indentation returns
//! - Each statement inside a block is its own group
//! - A dedent must return to a column some enclosing block started at
//!
//! ```rust
//! # use offside::parse;
//! let tree = parse("when ready\n    launch 3\n    wait 1.5").unwrap();
//! assert_eq!(tree.to_string(), "(when ready (launch 3) (wait 1.5))");
//! ```
//!
//! ## Error Handling
//!
//! The first error ends the parse; nothing partial is returned.
//!
//! ```rust
//! # use offside::{parse, LexicalErrorKind};
//! let err = parse("f\n        a\n    b").unwrap_err();
//! assert_eq!(
//!     err.lexical_kind(),
//!     Some(&LexicalErrorKind::AmbiguousDedent { width: 4 })
//! );
//! ```

pub mod error;
pub mod frontend;
pub mod lexer;
pub mod parser;

// Re-export main types
pub use error::{Error, LexicalError, LexicalErrorKind, Result, SyntaxError, SyntaxErrorKind};
pub use frontend::{parse, Frontend, FrontendConfig};
pub use lexer::{
    CharSource, IndentNormalizer, Position, RawLexer, Token, TokenKind, TokenStream, OPERATORS,
};
pub use parser::{Tree, TreeBuilder};

/// Version of the Offside front end
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
