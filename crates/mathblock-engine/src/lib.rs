pub mod parsing;

// Re-export key types for easier usage
pub use parsing::{
    ParsedDoc, Parser, ParserOptions, parse_document,
    blocks::{BlockParser, BlockState, ChildPolicy, FencedCodeParser, MathBlockParser},
    context::{ContextKey, ContextValue, ParseContext},
    reader::LineReader,
    rope::Span,
    tree::{Document, MathBlock, NodeId, NodeKind},
};
