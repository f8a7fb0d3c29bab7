//! Error types for the Offside front end

use crate::lexer::Position;
use thiserror::Error;

/// Failure raised while turning characters into tokens
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Lexical error at {position}: {kind}")]
pub struct LexicalError {
    /// Where the offending character (or line) starts
    pub position: Position,
    /// What went wrong
    pub kind: LexicalErrorKind,
}

impl LexicalError {
    /// Creates a lexical error at the given position
    pub fn new(position: Position, kind: LexicalErrorKind) -> Self {
        LexicalError { position, kind }
    }
}

/// Kinds of lexical errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexicalErrorKind {
    /// The underlying reader failed or produced invalid UTF-8
    #[error("I/O failure: {0}")]
    IoFailure(String),

    /// A string literal was still open when the input ended
    ///
    /// **Example:** `print "hello` (no closing quote)
    #[error("Unterminated string literal")]
    UnterminatedString,

    /// A tab character appeared in leading indentation
    ///
    /// **Prevention:** indent with spaces only
    #[error("Tab character in indentation")]
    TabIndentation,

    /// A dedent landed between two recorded indentation levels
    ///
    /// **Example:** a line at width 2 after blocks opened at widths 0 and 4
    #[error("Ambiguous dedent to width {width}: no enclosing block starts at that column")]
    AmbiguousDedent {
        /// Indentation width of the offending line
        width: usize,
    },
}

/// Failure raised while assembling the tree from bracket tokens
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Syntax error at {position}: {kind}")]
pub struct SyntaxError {
    /// Position of the bracket (or token) responsible
    pub position: Position,
    /// What went wrong
    pub kind: SyntaxErrorKind,
}

impl SyntaxError {
    /// Creates a syntax error at the given position
    pub fn new(position: Position, kind: SyntaxErrorKind) -> Self {
        SyntaxError { position, kind }
    }
}

/// Kinds of syntax errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// An opener without a closer, or a closer without an opener
    #[error("Unbalanced brackets")]
    UnbalancedBrackets,

    /// Indent, Dedent or StatementEnd reached the tree builder
    #[error("Layout token in bracket-only stream")]
    UnexpectedLayoutToken,

    /// Nesting exceeded the configured limit
    #[error("Nesting deeper than {limit} levels")]
    NestingTooDeep {
        /// Configured maximum depth
        limit: usize,
    },
}

/// Offside front-end errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Error from the character scanner or lexer
    #[error(transparent)]
    Lexical(#[from] LexicalError),

    /// Error from the tree builder
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl Error {
    /// Position the error refers to
    pub fn position(&self) -> Position {
        match self {
            Error::Lexical(e) => e.position,
            Error::Syntax(e) => e.position,
        }
    }

    /// Returns the lexical error kind, if this is a lexical error
    pub fn lexical_kind(&self) -> Option<&LexicalErrorKind> {
        match self {
            Error::Lexical(e) => Some(&e.kind),
            Error::Syntax(_) => None,
        }
    }

    /// Returns the syntax error kind, if this is a syntax error
    pub fn syntax_kind(&self) -> Option<&SyntaxErrorKind> {
        match self {
            Error::Syntax(e) => Some(&e.kind),
            Error::Lexical(_) => None,
        }
    }
}

/// Result type for Offside operations
pub type Result<T> = std::result::Result<T, Error>;
