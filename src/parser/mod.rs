//! Offside Parser Module
//!
//! Assembles the bracket-only token stream into S-expression trees.

mod tree;
mod tree_builder;

pub use tree::Tree;
pub use tree_builder::TreeBuilder;
