//! Front-end driver: character source → raw lexer → normalizer → tree
//!
//! Every call builds fresh stage instances, so one [`Frontend`] can parse any
//! number of independent sources.

use crate::error::Result;
use crate::lexer::{IndentNormalizer, RawLexer, Token};
use crate::parser::{Tree, TreeBuilder};
use std::io::BufRead;

/// Configuration for parsing
#[derive(Debug, Clone, Default)]
pub struct FrontendConfig {
    /// Maximum list nesting below the root (default: unlimited)
    pub max_nesting_depth: Option<usize>,
}

/// Entry point that runs the whole pipeline
#[derive(Debug, Clone, Default)]
pub struct Frontend {
    config: FrontendConfig,
}

impl Frontend {
    /// Creates a front end with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a front end with the given configuration
    pub fn with_config(config: FrontendConfig) -> Self {
        Frontend { config }
    }

    /// Active configuration
    pub fn config(&self) -> &FrontendConfig {
        &self.config
    }

    /// Parses source text read from `reader` into its root tree
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<Tree> {
        tracing::debug!(max_depth = ?self.config.max_nesting_depth, "parse started");
        let normalized = IndentNormalizer::new(RawLexer::new(reader));
        let tree = TreeBuilder::new(normalized)
            .with_max_depth(self.config.max_nesting_depth)
            .build();
        match &tree {
            Ok(root) => tracing::debug!(statements = root.children().len(), "parse finished"),
            Err(e) => tracing::debug!(error = %e, "parse failed"),
        }
        tree
    }

    /// Parses an in-memory source string
    pub fn parse_str(&self, source: &str) -> Result<Tree> {
        self.parse_reader(source.as_bytes())
    }

    /// Tokens straight from the lexer, layout markers included
    pub fn raw_tokens(&self, source: &str) -> Result<Vec<Token>> {
        RawLexer::from_source(source).tokenize()
    }

    /// Tokens after layout has been rewritten into brackets
    pub fn normalized_tokens(&self, source: &str) -> Result<Vec<Token>> {
        IndentNormalizer::new(RawLexer::from_source(source)).tokenize()
    }
}

/// Parses `source` with the default configuration
pub fn parse(source: &str) -> Result<Tree> {
    Frontend::new().parse_str(source)
}
