use crate::lexer::Token;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::mem;

/// Parsed S-expression: an atomic token or an ordered list of sub-trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Tree {
    /// Leaf holding an identifier, string, number or operator token
    Atom(Token),
    /// Group, written with brackets or synthesized from indentation
    List(Vec<Tree>),
}

impl Tree {
    /// Children of a list; atoms have none
    pub fn children(&self) -> &[Tree] {
        match self {
            Tree::Atom(_) => &[],
            Tree::List(items) => items,
        }
    }

    /// Token of an atom
    pub fn as_atom(&self) -> Option<&Token> {
        match self {
            Tree::Atom(token) => Some(token),
            Tree::List(_) => None,
        }
    }

    /// Check if this node is a list
    pub fn is_list(&self) -> bool {
        matches!(self, Tree::List(_))
    }

    /// Nesting depth; an atom is 0, a list is one more than its deepest child
    pub fn depth(&self) -> usize {
        // Iterative so very deep trees do not exhaust the stack
        let mut deepest = 0;
        let mut work = vec![(self, 0usize)];
        while let Some((node, level)) = work.pop() {
            if let Tree::List(items) = node {
                deepest = deepest.max(level + 1);
                work.extend(items.iter().map(|child| (child, level + 1)));
            }
        }
        deepest
    }

    /// Compares shape and token kinds, ignoring source positions
    pub fn structurally_eq(&self, other: &Tree) -> bool {
        let mut work = vec![(self, other)];
        while let Some((a, b)) = work.pop() {
            match (a, b) {
                (Tree::Atom(x), Tree::Atom(y)) => {
                    if x.kind != y.kind {
                        return false;
                    }
                }
                (Tree::List(xs), Tree::List(ys)) => {
                    if xs.len() != ys.len() {
                        return false;
                    }
                    work.extend(xs.iter().zip(ys.iter()));
                }
                _ => return false,
            }
        }
        true
    }

    /// Renders a root list as source text: its children separated by
    /// spaces, without the outer brackets the parser adds implicitly.
    /// Parsing the result yields a structurally equal tree.
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        // Writing into a String never fails
        let _ = render(&mut out, self, false);
        out
    }
}

impl From<Token> for Tree {
    fn from(token: Token) -> Self {
        Tree::Atom(token)
    }
}

/// Frees nested lists one level at a time instead of recursing
impl Drop for Tree {
    fn drop(&mut self) {
        let Tree::List(items) = self else { return };
        let mut work = mem::take(items);
        while let Some(mut node) = work.pop() {
            if let Tree::List(children) = &mut node {
                work.append(children);
            }
        }
    }
}

/// Bracketed textual form, e.g. `(f (a b) "s")`
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        render(f, self, true)
    }
}

enum Piece<'a> {
    Node(&'a Tree),
    Text(&'static str),
}

/// Writes `root` using an explicit stack. With `outer_brackets` false a
/// root list is written as its bare, space-separated children.
fn render<W: fmt::Write>(out: &mut W, root: &Tree, outer_brackets: bool) -> fmt::Result {
    let mut work = Vec::new();
    match root {
        Tree::List(items) if !outer_brackets => push_items(&mut work, items),
        _ => work.push(Piece::Node(root)),
    }

    while let Some(piece) = work.pop() {
        match piece {
            Piece::Text(text) => out.write_str(text)?,
            Piece::Node(Tree::Atom(token)) => write!(out, "{}", token.kind)?,
            Piece::Node(Tree::List(items)) => {
                out.write_str("(")?;
                work.push(Piece::Text(")"));
                push_items(&mut work, items);
            }
        }
    }
    Ok(())
}

/// Queues `items` so they pop in order with single spaces between them
fn push_items<'a>(work: &mut Vec<Piece<'a>>, items: &'a [Tree]) {
    for (i, item) in items.iter().enumerate().rev() {
        work.push(Piece::Node(item));
        if i > 0 {
            work.push(Piece::Text(" "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Position, TokenKind};

    fn atom(kind: TokenKind, column: usize) -> Tree {
        Tree::Atom(Token::new(kind, Position::new(1, column)))
    }

    fn ident(s: &str, column: usize) -> Tree {
        atom(TokenKind::Identifier(s.to_string()), column)
    }

    #[test]
    fn test_display_brackets() {
        let tree = Tree::List(vec![
            ident("f", 1),
            Tree::List(vec![ident("a", 4), atom(TokenKind::Int("1".to_string()), 6)]),
            atom(TokenKind::String("s t".to_string()), 9),
            Tree::List(vec![]),
        ]);
        assert_eq!(tree.to_string(), "(f (a 1) \"s t\" ())");
        assert_eq!(tree.to_source(), "f (a 1) \"s t\" ()");
    }

    #[test]
    fn test_structural_equality_ignores_positions() {
        let a = Tree::List(vec![ident("x", 1), Tree::List(vec![ident("y", 3)])]);
        let b = Tree::List(vec![ident("x", 7), Tree::List(vec![ident("y", 9)])]);
        let c = Tree::List(vec![ident("x", 1), ident("y", 3)]);
        assert!(a.structurally_eq(&b));
        assert_ne!(a, b);
        assert!(!a.structurally_eq(&c));
    }

    #[test]
    fn test_depth_and_accessors() {
        let leaf = ident("x", 1);
        assert_eq!(leaf.depth(), 0);
        assert!(leaf.children().is_empty());
        assert!(leaf.as_atom().is_some());

        let tree = Tree::List(vec![Tree::List(vec![Tree::List(vec![])]), leaf]);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.children().len(), 2);
        assert!(tree.is_list());
    }

    #[test]
    fn test_string_atom_renders_like_token() {
        let token = Token::new(TokenKind::String(r#"a\"b"#.to_string()), Position::default());
        let tree = Tree::from(token.clone());
        assert_eq!(tree.to_string(), token.kind.to_string());
        assert_eq!(tree.to_string(), r#""a\"b""#);
    }

    #[test]
    fn test_deep_tree_renders_and_drops() {
        let depth = 200_000;
        let mut tree = Tree::List(vec![]);
        for _ in 0..depth {
            tree = Tree::List(vec![tree]);
        }

        let rendered = tree.to_string();
        assert_eq!(rendered.len(), 2 * (depth + 1));
        assert!(rendered.starts_with("(((") && rendered.ends_with(")))"));
        assert_eq!(tree.to_source().len(), 2 * depth);
        drop(tree);
    }
}
