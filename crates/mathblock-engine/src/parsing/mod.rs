//! # Parsing
//!
//! A minimal line-oriented block parser hosting pluggable recognizers, the
//! main one being the `$$` math block recognizer.
//!
//! All nodes store byte spans into the caller's [`Rope`]; nothing is copied
//! until a caller asks for text.

pub mod blocks;
pub mod context;
pub mod parser;
pub mod reader;
pub mod rope;
pub mod snapshot;
pub mod tree;

#[cfg(test)]
mod tests;

use xi_rope::Rope;

pub use parser::{Parser, ParserOptions};
use tree::{Document, NodeId, NodeKind};

#[derive(Debug)]
pub struct ParsedDoc {
    pub tree: Document,
}

impl ParsedDoc {
    /// Every math block in document order with its captured content.
    pub fn math_blocks(&self, rope: &Rope) -> Vec<(NodeId, String)> {
        self.tree
            .descendants()
            .into_iter()
            .filter(|&id| matches!(self.tree.kind(id), NodeKind::MathBlock(_)))
            .map(|id| (id, self.tree.text(id, rope)))
            .collect()
    }
}

/// Parses `rope` with every recognizer enabled.
pub fn parse_document(rope: &Rope) -> ParsedDoc {
    Parser::default().parse(rope)
}
