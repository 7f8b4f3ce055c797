use xi_rope::Rope;

use crate::parsing::{
    rope::truncate_text,
    tree::{Document, NodeKind},
};

/// Flattened view of a parsed document, one entry per top-level block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snap {
    pub blocks: Vec<BlockSnap>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSnap {
    /// Block kind label (e.g. "MathBlock", "FencedCode(Tildes)").
    pub kind: String,
    /// Line spans as (start, end) tuples.
    pub lines: Vec<(usize, usize)>,
    /// Captured text, truncated for readability.
    pub text: String,
}

impl BlockSnap {
    /// Shorthand for building expected snapshots in tests.
    pub fn new(kind: &str, lines: &[(usize, usize)], text: &str) -> Self {
        Self {
            kind: kind.to_string(),
            lines: lines.to_vec(),
            text: text.to_string(),
        }
    }
}

pub fn normalize(rope: &Rope, doc: &Document) -> Snap {
    let blocks = doc
        .children(doc.root())
        .iter()
        .map(|&id| {
            let kind = match doc.kind(id) {
                NodeKind::FencedCode { kind } => format!("FencedCode({kind:?})"),
                other => other.name().to_string(),
            };
            let lines = doc.lines(id).iter().map(|sp| (sp.start, sp.end)).collect();
            let text = truncate_text(doc.text(id, rope), 80);
            BlockSnap { kind, lines, text }
        })
        .collect();

    Snap { blocks }
}
