use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Fixed operator/keyword set, matched exactly and case-sensitively
pub const OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "**", "%", "and", "or", "not", "==", "!=", ">", "<", "<=", ">=", "=",
    ":=",
];

lazy_static! {
    static ref OPERATOR_SET: HashSet<&'static str> = OPERATORS.iter().copied().collect();
    static ref INT_RE: Regex = Regex::new(r"^-?[0-9]+$").unwrap();
    static ref FLOAT_RE: Regex = Regex::new(r"^[+-]?[0-9]*\.[0-9]+$").unwrap();
}

/// Location in the source text (1-indexed, column counted in chars)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number
    pub line: usize,
    /// Column number, in Unicode scalar values
    pub column: usize,
}

impl Position {
    /// Creates a position
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Where the token starts
    pub position: Position,
}

impl Token {
    /// Creates a new token
    pub fn new(kind: TokenKind, position: Position) -> Self {
        Token { kind, position }
    }

    /// Builds the token for a bare identifier/operator/number run
    pub fn classify(text: String, position: Position) -> Self {
        Token::new(TokenKind::classify(text), position)
    }
}

/// All token types produced by the lexer and the normalizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// `(`, written or synthesized
    OpenBracket,
    /// `)`, written or synthesized
    CloseBracket,
    /// Identifier text
    Identifier(String),
    /// String literal contents, quotes stripped
    String(String),
    /// Integer literal text
    Int(String),
    /// Decimal literal text
    Float(String),
    /// Member of [`OPERATORS`]
    Operator(String),
    /// Indentation grew; carries the number of levels opened
    Indent(usize),
    /// Indentation shrank; carries the number of levels closed
    Dedent(usize),
    /// Line break at unchanged indentation
    StatementEnd,
}

impl TokenKind {
    /// Classifies a run of non-delimiter characters. First match wins:
    /// operator, integer, decimal, identifier.
    pub fn classify(text: String) -> TokenKind {
        if OPERATOR_SET.contains(text.as_str()) {
            TokenKind::Operator(text)
        } else if INT_RE.is_match(&text) {
            TokenKind::Int(text)
        } else if FLOAT_RE.is_match(&text) {
            TokenKind::Float(text)
        } else {
            TokenKind::Identifier(text)
        }
    }

    /// Check if token becomes a leaf of the tree
    pub fn is_atom(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier(_)
                | TokenKind::String(_)
                | TokenKind::Int(_)
                | TokenKind::Float(_)
                | TokenKind::Operator(_)
        )
    }

    /// Check if token only describes layout
    pub fn is_layout(&self) -> bool {
        matches!(
            self,
            TokenKind::Indent(_) | TokenKind::Dedent(_) | TokenKind::StatementEnd
        )
    }

    /// Text carried by atom tokens
    pub fn text(&self) -> Option<&str> {
        match self {
            TokenKind::Identifier(s)
            | TokenKind::String(s)
            | TokenKind::Int(s)
            | TokenKind::Float(s)
            | TokenKind::Operator(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::OpenBracket => write!(f, "("),
            TokenKind::CloseBracket => write!(f, ")"),
            TokenKind::String(s) => write!(f, "\"{}\"", s),
            TokenKind::Identifier(s)
            | TokenKind::Int(s)
            | TokenKind::Float(s)
            | TokenKind::Operator(s) => write!(f, "{}", s),
            TokenKind::Indent(n) => write!(f, "<indent {}>", n),
            TokenKind::Dedent(n) => write!(f, "<dedent {}>", n),
            TokenKind::StatementEnd => write!(f, "<end>"),
        }
    }
}
