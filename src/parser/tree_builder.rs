use super::tree::Tree;
use crate::error::{Result, SyntaxError, SyntaxErrorKind};
use crate::lexer::{Position, TokenKind, TokenStream};
use std::mem;

/// Builds a [`Tree`] from a bracket-only token stream
///
/// Open lists live on an explicit work-stack, so nesting depth is limited
/// only by memory (or by `max_depth` when set). The resulting tree renders
/// and drops without recursion as well.
pub struct TreeBuilder<S> {
    tokens: S,
    max_depth: Option<usize>,
}

impl<S: TokenStream> TreeBuilder<S> {
    /// Creates a builder without a nesting limit
    pub fn new(tokens: S) -> Self {
        TreeBuilder {
            tokens,
            max_depth: None,
        }
    }

    /// Rejects input nested deeper than `limit` lists below the root
    pub fn with_max_depth(mut self, limit: Option<usize>) -> Self {
        self.max_depth = limit;
        self
    }

    /// Consumes the stream and returns the implicit root list
    pub fn build(mut self) -> Result<Tree> {
        // Each frame holds the opener position and the parent's items
        let mut frames: Vec<(Position, Vec<Tree>)> = Vec::new();
        let mut current: Vec<Tree> = Vec::new();

        while let Some(token) = self.tokens.next_token()? {
            match token.kind {
                TokenKind::OpenBracket => {
                    if let Some(limit) = self.max_depth {
                        if frames.len() >= limit {
                            return Err(SyntaxError::new(
                                token.position,
                                SyntaxErrorKind::NestingTooDeep { limit },
                            )
                            .into());
                        }
                    }
                    frames.push((token.position, mem::take(&mut current)));
                }
                TokenKind::CloseBracket => {
                    let Some((_, parent)) = frames.pop() else {
                        return Err(SyntaxError::new(
                            token.position,
                            SyntaxErrorKind::UnbalancedBrackets,
                        )
                        .into());
                    };
                    let finished = mem::replace(&mut current, parent);
                    current.push(Tree::List(finished));
                }
                _ if token.kind.is_atom() => current.push(Tree::Atom(token)),
                _ => {
                    return Err(SyntaxError::new(
                        token.position,
                        SyntaxErrorKind::UnexpectedLayoutToken,
                    )
                    .into())
                }
            }
        }

        if let Some((opener, _)) = frames.last() {
            return Err(SyntaxError::new(*opener, SyntaxErrorKind::UnbalancedBrackets).into());
        }

        tracing::debug!(items = current.len(), "built tree");
        Ok(Tree::List(current))
    }
}
